use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::quote::{Quote, QuoteStatus};
use crate::services::pricing_service::SuppliedPrices;
use crate::utils::validation::validate_money;

// Request para crear un presupuesto
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    #[validate(length(min = 1, max = 255))]
    pub customer_name: String,

    #[validate(email)]
    pub customer_email: Option<String>,

    #[validate(length(max = 50))]
    pub customer_phone: Option<String>,

    #[validate(length(max = 1000))]
    pub customer_address: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub material_name: String,

    #[validate(custom = "validate_money")]
    pub trade_price_ex_vat: Decimal,

    #[validate(custom = "validate_money")]
    pub trade_price_inc_vat: Option<Decimal>,

    #[validate(custom = "validate_money")]
    pub customer_price_ex_vat: Option<Decimal>,

    #[validate(custom = "validate_money")]
    pub customer_price_inc_vat: Option<Decimal>,

    /// Detalle de líneas, estructura libre
    pub quote_data: Option<serde_json::Value>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,

    #[validate(range(min = 1, max = 365))]
    pub valid_days: Option<i64>,
}

impl CreateQuoteRequest {
    pub fn supplied_prices(&self) -> SuppliedPrices {
        SuppliedPrices {
            trade_price_ex_vat: self.trade_price_ex_vat,
            trade_price_inc_vat: self.trade_price_inc_vat,
            customer_price_ex_vat: self.customer_price_ex_vat,
            customer_price_inc_vat: self.customer_price_inc_vat,
        }
    }
}

// Request para cambiar el estado
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuoteStatusRequest {
    pub status: QuoteStatus,
}

// Response de presupuesto
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub created_by: Option<Uuid>,
    pub created_by_name: Option<String>,
    pub reference: String,
    pub status: QuoteStatus,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub material_name: String,
    pub trade_price_ex_vat: Decimal,
    pub trade_price_inc_vat: Decimal,
    pub customer_price_ex_vat: Decimal,
    pub customer_price_inc_vat: Decimal,
    pub quote_data: serde_json::Value,
    pub notes: Option<String>,
    pub valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            company_id: quote.company_id,
            created_by: quote.created_by,
            created_by_name: quote.created_by_name,
            reference: quote.reference,
            status: quote.status,
            customer_name: quote.customer_name,
            customer_email: quote.customer_email,
            customer_phone: quote.customer_phone,
            customer_address: quote.customer_address,
            material_name: quote.material_name,
            trade_price_ex_vat: quote.trade_price_ex_vat,
            trade_price_inc_vat: quote.trade_price_inc_vat,
            customer_price_ex_vat: quote.customer_price_ex_vat,
            customer_price_inc_vat: quote.customer_price_inc_vat,
            quote_data: quote.quote_data,
            notes: quote.notes,
            valid_until: quote.valid_until,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}
