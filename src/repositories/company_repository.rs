use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::branding::Branding;
use crate::models::company::Company;
use crate::models::user::User;
use crate::repositories::{branding_repository::BrandingRepository, user_repository::UserRepository};
use crate::utils::errors::{is_unique_violation, AppError};

const EMAIL_TAKEN: &str = "Email already registered";

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta de un tenant completo: empresa, branding y primer usuario.
    ///
    /// Las tres inserciones van en una única transacción; si cualquiera
    /// falla no queda ningún rastro del tenant. La unicidad del email la
    /// decide la restricción `users_email_key`, también entre altas
    /// concurrentes.
    pub async fn register_tenant(
        &self,
        company: &Company,
        branding: &Branding,
        user: &User,
    ) -> Result<(Company, User), AppError> {
        let mut tx = self.pool.begin().await?;

        let saved_company = Self::insert(&mut *tx, company).await?;
        BrandingRepository::insert(&mut *tx, branding).await?;
        let saved_user = UserRepository::insert(&mut *tx, user)
            .await
            .map_err(|e| match e {
                AppError::Database(ref db) if is_unique_violation(db, "users_email_key") => {
                    AppError::Conflict(EMAIL_TAKEN.to_string())
                }
                other => other,
            })?;

        tx.commit().await?;
        Ok((saved_company, saved_user))
    }

    async fn insert(conn: &mut PgConnection, company: &Company) -> Result<Company, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, email, phone, address_line1, address_line2, city, postcode,
                vat_number, status, trial_ends_at, markup_percentage, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.email)
        .bind(&company.phone)
        .bind(&company.address_line1)
        .bind(&company.address_line2)
        .bind(&company.city)
        .bind(&company.postcode)
        .bind(&company.vat_number)
        .bind(company.status)
        .bind(company.trial_ends_at)
        .bind(company.markup_percentage)
        .bind(company.created_at)
        .bind(company.updated_at)
        .fetch_one(conn)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    /// Actualización parcial del perfil: lee la fila con bloqueo, aplica
    /// `patch` y la guarda, todo en una transacción.
    pub async fn update_profile<F>(&self, company_id: Uuid, patch: F) -> Result<Company, AppError>
    where
        F: FnOnce(&mut Company) + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut company = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE id = $1 FOR UPDATE",
        )
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

        patch(&mut company);

        let updated = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, phone = $3, address_line1 = $4, address_line2 = $5,
                city = $6, postcode = $7, vat_number = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&company.name)
        .bind(&company.phone)
        .bind(&company.address_line1)
        .bind(&company.address_line2)
        .bind(&company.city)
        .bind(&company.postcode)
        .bind(&company.vat_number)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
