//! Modelo de Quote
//!
//! Presupuesto emitido por una empresa a un cliente final. Los datos del
//! cliente son una copia desnormalizada (los clientes no son entidades).
//! Una vez creado sólo cambian `status` y `updated_at`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Validez por defecto de un presupuesto
pub const DEFAULT_VALID_DAYS: i64 = 30;

/// Estado del presupuesto - mapea al ENUM quote_status
///
/// No hay grafo de transiciones: cualquier estado puede fijarse desde
/// cualquier otro.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "quote_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

/// Importes del presupuesto (trade y cliente, con y sin IVA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePrices {
    pub trade_price_ex_vat: Decimal,
    pub trade_price_inc_vat: Decimal,
    pub customer_price_ex_vat: Decimal,
    pub customer_price_inc_vat: Decimal,
}

/// Datos de un presupuesto nuevo, ya validados y con precios resueltos
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub company_id: Uuid,
    pub created_by: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub material_name: String,
    pub prices: QuotePrices,
    pub quote_data: serde_json::Value,
    pub notes: Option<String>,
    pub valid_until: DateTime<Utc>,
}

/// Quote - fila de `quotes` con el nombre del creador (LEFT JOIN users)
#[derive(Debug, Clone, FromRow)]
pub struct Quote {
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
