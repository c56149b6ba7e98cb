use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::branding_dto::{BrandingResponse, UpdateBrandingRequest};
use crate::dto::company_dto::ApiResponse;
use crate::repositories::branding_repository::BrandingRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct BrandingController {
    repository: BrandingRepository,
}

impl BrandingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BrandingRepository::new(pool),
        }
    }

    pub async fn get(&self, company_id: Uuid) -> Result<BrandingResponse, AppError> {
        let branding = self
            .repository
            .find_with_contact(company_id)
            .await?
            .ok_or_else(|| not_found_error("Branding"))?;

        Ok(branding.into())
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        request: UpdateBrandingRequest,
    ) -> Result<ApiResponse, AppError> {
        self.repository
            .update(company_id, |branding| request.apply_to(branding))
            .await?;

        info!("🎨 Branding actualizado para empresa {}", company_id);
        Ok(ApiResponse::ok())
    }
}
