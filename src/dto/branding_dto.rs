use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::branding::{Branding, BrandingWithContact};
use crate::utils::patch::{double_option, merge, merge_nullable};
use crate::utils::validation::{collect, finish, validate_hex_colour, validate_max_length};

// Response de branding con los datos de contacto de la empresa
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub logo_url: Option<String>,
    pub primary_colour: String,
    pub secondary_colour: String,
    pub quote_header_text: Option<String>,
    pub quote_footer_text: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub vat_number: Option<String>,
}

impl From<BrandingWithContact> for BrandingResponse {
    fn from(row: BrandingWithContact) -> Self {
        let branding = row.branding;
        Self {
            id: branding.id,
            company_id: branding.company_id,
            logo_url: branding.logo_url,
            primary_colour: branding.primary_colour,
            secondary_colour: branding.secondary_colour,
            quote_header_text: branding.quote_header_text,
            quote_footer_text: branding.quote_footer_text,
            updated_at: branding.updated_at,
            company_name: row.company_name,
            company_email: row.company_email,
            company_phone: row.company_phone,
            address_line1: row.address_line1,
            address_line2: row.address_line2,
            city: row.city,
            postcode: row.postcode,
            vat_number: row.vat_number,
        }
    }
}

// Request para actualizar el branding (parcial)
//
// Los colores no admiten borrado: un `null` equivale a no enviarlos.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBrandingRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
    pub primary_colour: Option<String>,
    pub secondary_colour: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub quote_header_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub quote_footer_text: Option<Option<String>>,
}

impl UpdateBrandingRequest {
    /// Aplica el parche sobre la fila actual
    pub fn apply_to(self, branding: &mut Branding) {
        merge_nullable(&mut branding.logo_url, self.logo_url);
        merge(&mut branding.primary_colour, self.primary_colour);
        merge(&mut branding.secondary_colour, self.secondary_colour);
        merge_nullable(&mut branding.quote_header_text, self.quote_header_text);
        merge_nullable(&mut branding.quote_footer_text, self.quote_footer_text);
    }
}

impl Validate for UpdateBrandingRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(colour) = &self.primary_colour {
            collect(&mut errors, "primaryColour", validate_hex_colour(colour));
        }
        if let Some(colour) = &self.secondary_colour {
            collect(&mut errors, "secondaryColour", validate_hex_colour(colour));
        }
        if let Some(Some(url)) = &self.logo_url {
            collect(&mut errors, "logoUrl", validate_max_length(url, 2048));
        }
        if let Some(Some(text)) = &self.quote_header_text {
            collect(&mut errors, "quoteHeaderText", validate_max_length(text, 2000));
        }
        if let Some(Some(text)) = &self.quote_footer_text {
            collect(&mut errors, "quoteFooterText", validate_max_length(text, 2000));
        }

        finish(errors)
    }
}
