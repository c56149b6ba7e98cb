//! Modelo de Branding
//!
//! Relación 1:1 con Company. Se crea con valores por defecto al registrar
//! la empresa y sólo se modifica vía `PUT /api/branding`.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_PRIMARY_COLOUR: &str = "#1e3a5f";
pub const DEFAULT_SECONDARY_COLOUR: &str = "#c9a227";

/// Branding - mapea exactamente a la tabla branding
#[derive(Debug, Clone, FromRow)]
pub struct Branding {
    pub id: Uuid,
    pub company_id: Uuid,
    pub logo_url: Option<String>,
    pub primary_colour: String,
    pub secondary_colour: String,
    pub quote_header_text: Option<String>,
    pub quote_footer_text: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Branding {
    pub fn default_for(company_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            logo_url: None,
            primary_colour: DEFAULT_PRIMARY_COLOUR.to_string(),
            secondary_colour: DEFAULT_SECONDARY_COLOUR.to_string(),
            quote_header_text: None,
            quote_footer_text: None,
            updated_at: Utc::now(),
        }
    }
}

/// Branding junto con los datos de contacto de la empresa
#[derive(Debug, Clone, FromRow)]
pub struct BrandingWithContact {
    #[sqlx(flatten)]
    pub branding: Branding,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub vat_number: Option<String>,
}
