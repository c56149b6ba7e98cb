use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::company_dto::{ApiResponse, UpdateCompanyRequest};
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::AppError;

pub struct CompanyController {
    repository: CompanyRepository,
}

impl CompanyController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CompanyRepository::new(pool),
        }
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        request: UpdateCompanyRequest,
    ) -> Result<ApiResponse, AppError> {
        let company = self
            .repository
            .update_profile(company_id, |company| request.apply_to(company))
            .await?;

        info!("🏢 Perfil de empresa actualizado: {}", company.id);
        Ok(ApiResponse::ok())
    }
}
