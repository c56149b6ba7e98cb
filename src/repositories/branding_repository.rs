use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::branding::{Branding, BrandingWithContact};
use crate::utils::errors::AppError;

pub struct BrandingRepository {
    pool: PgPool,
}

impl BrandingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn insert(conn: &mut PgConnection, branding: &Branding) -> Result<Branding, AppError> {
        let result = sqlx::query_as::<_, Branding>(
            r#"
            INSERT INTO branding (
                id, company_id, logo_url, primary_colour, secondary_colour,
                quote_header_text, quote_footer_text, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(branding.id)
        .bind(branding.company_id)
        .bind(&branding.logo_url)
        .bind(&branding.primary_colour)
        .bind(&branding.secondary_colour)
        .bind(&branding.quote_header_text)
        .bind(&branding.quote_footer_text)
        .bind(branding.updated_at)
        .fetch_one(conn)
        .await?;

        Ok(result)
    }

    /// Branding de la empresa junto con sus datos de contacto
    pub async fn find_with_contact(&self, company_id: Uuid) -> Result<Option<BrandingWithContact>, AppError> {
        let result = sqlx::query_as::<_, BrandingWithContact>(
            r#"
            SELECT b.id, b.company_id, b.logo_url, b.primary_colour, b.secondary_colour,
                   b.quote_header_text, b.quote_footer_text, b.updated_at,
                   c.name AS company_name, c.email AS company_email, c.phone AS company_phone,
                   c.address_line1, c.address_line2, c.city, c.postcode, c.vat_number
            FROM branding b
            JOIN companies c ON c.id = b.company_id
            WHERE b.company_id = $1
            "#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Actualización parcial: lee con bloqueo, aplica `patch` y guarda
    pub async fn update<F>(&self, company_id: Uuid, patch: F) -> Result<Branding, AppError>
    where
        F: FnOnce(&mut Branding) + Send,
    {
        let mut tx = self.pool.begin().await?;

        let mut branding = sqlx::query_as::<_, Branding>(
            "SELECT * FROM branding WHERE company_id = $1 FOR UPDATE",
        )
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Branding not found".to_string()))?;

        patch(&mut branding);

        let updated = sqlx::query_as::<_, Branding>(
            r#"
            UPDATE branding
            SET logo_url = $2, primary_colour = $3, secondary_colour = $4,
                quote_header_text = $5, quote_footer_text = $6, updated_at = NOW()
            WHERE company_id = $1
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&branding.logo_url)
        .bind(&branding.primary_colour)
        .bind(&branding.secondary_colour)
        .bind(&branding.quote_header_text)
        .bind(&branding.quote_footer_text)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
