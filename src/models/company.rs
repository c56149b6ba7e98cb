//! Modelo de Company
//!
//! La empresa es la raíz del tenant: usuarios, branding y presupuestos
//! cuelgan de ella. Mapea exactamente a la tabla `companies`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Días de prueba concedidos al registrar una empresa
pub const TRIAL_DAYS: i64 = 14;

/// Forma canónica del nombre comercial (alta y actualización)
pub fn normalize_company_name(name: &str) -> String {
    name.trim().to_string()
}

/// Estado de la cuenta - mapea al ENUM company_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "company_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    #[default]
    Trial,
    Active,
    Suspended,
}

/// Company principal - mapea exactamente a la tabla companies
#[derive(Debug, Clone, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub vat_number: Option<String>,
    pub status: CompanyStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub markup_percentage: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Nueva empresa en periodo de prueba
    pub fn new(name: String, email: String, phone: Option<String>, postcode: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            address_line1: None,
            address_line2: None,
            city: None,
            postcode,
            vat_number: None,
            status: CompanyStatus::Trial,
            trial_ends_at: Some(now + chrono::Duration::days(TRIAL_DAYS)),
            markup_percentage: Decimal::from(20),
            created_at: now,
            updated_at: now,
        }
    }
}
