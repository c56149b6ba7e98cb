use sqlx::PgPool;
use uuid::Uuid;

use crate::models::quote::{NewQuote, Quote, QuoteStatus};
use crate::utils::errors::AppError;

/// Columnas de quote más el nombre del creador
const QUOTE_COLUMNS: &str = r#"
    q.id, q.company_id, q.created_by,
    NULLIF(TRIM(CONCAT(u.first_name, ' ', u.last_name)), '') AS created_by_name,
    q.reference, q.status, q.customer_name, q.customer_email, q.customer_phone,
    q.customer_address, q.material_name, q.trade_price_ex_vat, q.trade_price_inc_vat,
    q.customer_price_ex_vat, q.customer_price_inc_vat, q.quote_data, q.notes,
    q.valid_until, q.created_at, q.updated_at
"#;

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta el presupuesto con la referencia dada.
    ///
    /// Una referencia repetida devuelve el error de base de datos tal cual
    /// (violación de `quotes_reference_key`); el reintento es cosa del llamador.
    pub async fn create(&self, quote: &NewQuote, reference: &str) -> Result<Quote, AppError> {
        let sql = format!(
            r#"
            WITH q AS (
                INSERT INTO quotes (
                    id, company_id, created_by, reference, status,
                    customer_name, customer_email, customer_phone, customer_address,
                    material_name, trade_price_ex_vat, trade_price_inc_vat,
                    customer_price_ex_vat, customer_price_inc_vat,
                    quote_data, notes, valid_until
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING *
            )
            SELECT {QUOTE_COLUMNS}
            FROM q
            LEFT JOIN users u ON u.id = q.created_by
            "#
        );

        let result = sqlx::query_as::<_, Quote>(&sql)
            .bind(Uuid::new_v4())
            .bind(quote.company_id)
            .bind(quote.created_by)
            .bind(reference)
            .bind(QuoteStatus::Draft)
            .bind(&quote.customer_name)
            .bind(&quote.customer_email)
            .bind(&quote.customer_phone)
            .bind(&quote.customer_address)
            .bind(&quote.material_name)
            .bind(quote.prices.trade_price_ex_vat)
            .bind(quote.prices.trade_price_inc_vat)
            .bind(quote.prices.customer_price_ex_vat)
            .bind(quote.prices.customer_price_inc_vat)
            .bind(&quote.quote_data)
            .bind(&quote.notes)
            .bind(quote.valid_until)
            .fetch_one(&self.pool)
            .await?;

        Ok(result)
    }

    /// Un presupuesto de otra empresa se comporta igual que uno inexistente
    pub async fn find_by_id(&self, id: Uuid, company_id: Uuid) -> Result<Option<Quote>, AppError> {
        let sql = format!(
            r#"
            SELECT {QUOTE_COLUMNS}
            FROM quotes q
            LEFT JOIN users u ON u.id = q.created_by
            WHERE q.id = $1 AND q.company_id = $2
            "#
        );

        let result = sqlx::query_as::<_, Quote>(&sql)
            .bind(id)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let sql = format!(
            r#"
            SELECT {QUOTE_COLUMNS}
            FROM quotes q
            LEFT JOIN users u ON u.id = q.created_by
            WHERE q.company_id = $1
            ORDER BY q.created_at DESC, q.id
            "#
        );

        let result = sqlx::query_as::<_, Quote>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// Devuelve `false` si no existe ningún presupuesto con ese id en la empresa
    pub async fn update_status(
        &self,
        id: Uuid,
        company_id: Uuid,
        status: QuoteStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE quotes
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
