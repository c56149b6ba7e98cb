use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::company_dto::ApiResponse;
use crate::dto::quote_dto::{CreateQuoteRequest, QuoteResponse, UpdateQuoteStatusRequest};
use crate::models::quote::{NewQuote, DEFAULT_VALID_DAYS};
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::pricing_service::resolve_prices;
use crate::services::quote_reference::{generate_reference, MAX_REFERENCE_ATTEMPTS};
use crate::utils::errors::{is_unique_violation, not_found_error, AppError};

const REFERENCE_CONSTRAINT: &str = "quotes_reference_key";

pub struct QuoteController {
    quotes: QuoteRepository,
    companies: CompanyRepository,
}

impl QuoteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            quotes: QuoteRepository::new(pool.clone()),
            companies: CompanyRepository::new(pool),
        }
    }

    /// Crea un presupuesto en estado `draft`
    pub async fn create(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        request: CreateQuoteRequest,
    ) -> Result<QuoteResponse, AppError> {
        self.create_with(company_id, user_id, request, generate_reference).await
    }

    /// Igual que `create`, tomando las referencias de `next_reference`
    ///
    /// La restricción UNIQUE de `reference` decide; ante colisión se
    /// reintenta con otra referencia hasta `MAX_REFERENCE_ATTEMPTS` veces.
    pub async fn create_with<F>(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        request: CreateQuoteRequest,
        mut next_reference: F,
    ) -> Result<QuoteResponse, AppError>
    where
        F: FnMut() -> String + Send,
    {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| not_found_error("Company"))?;

        let prices = resolve_prices(request.supplied_prices(), company.markup_percentage)?;
        let valid_days = request.valid_days.unwrap_or(DEFAULT_VALID_DAYS);

        let new_quote = NewQuote {
            company_id,
            created_by: user_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            customer_address: request.customer_address,
            material_name: request.material_name,
            prices,
            quote_data: request.quote_data.unwrap_or_else(|| serde_json::json!({})),
            notes: request.notes,
            valid_until: Utc::now() + Duration::days(valid_days),
        };

        for attempt in 1..=MAX_REFERENCE_ATTEMPTS {
            let reference = next_reference();
            match self.quotes.create(&new_quote, &reference).await {
                Ok(quote) => {
                    info!("📝 Presupuesto {} creado para empresa {}", quote.reference, company_id);
                    return Ok(quote.into());
                }
                Err(AppError::Database(ref e)) if is_unique_violation(e, REFERENCE_CONSTRAINT) => {
                    warn!(
                        "⚠️ Referencia {} ya existe (intento {}/{})",
                        reference, attempt, MAX_REFERENCE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::ReferenceCollision)
    }

    pub async fn list(&self, company_id: Uuid) -> Result<Vec<QuoteResponse>, AppError> {
        let quotes = self.quotes.list_by_company(company_id).await?;
        Ok(quotes.into_iter().map(QuoteResponse::from).collect())
    }

    pub async fn get(&self, id: Uuid, company_id: Uuid) -> Result<QuoteResponse, AppError> {
        let quote = self
            .quotes
            .find_by_id(id, company_id)
            .await?
            .ok_or_else(|| not_found_error("Quote"))?;

        Ok(quote.into())
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        company_id: Uuid,
        request: UpdateQuoteStatusRequest,
    ) -> Result<ApiResponse, AppError> {
        if !self.quotes.update_status(id, company_id, request.status).await? {
            return Err(not_found_error("Quote"));
        }

        info!("📝 Presupuesto {} pasa a {:?}", id, request.status);
        Ok(ApiResponse::ok())
    }
}
