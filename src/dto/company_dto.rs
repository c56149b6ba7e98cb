use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::company::{normalize_company_name, Company, CompanyStatus};
use crate::utils::patch::{double_option, merge, merge_nullable};
use crate::utils::validation::{collect, finish, validate_max_length, validate_not_empty};

// Response de empresa
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
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
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            email: company.email,
            phone: company.phone,
            address_line1: company.address_line1,
            address_line2: company.address_line2,
            city: company.city,
            postcode: company.postcode,
            vat_number: company.vat_number,
            status: company.status,
            trial_ends_at: company.trial_ends_at,
            markup_percentage: company.markup_percentage,
            created_at: company.created_at,
        }
    }
}

// Request para actualizar el perfil de la empresa (parcial)
//
// `companyName` no admite borrado: un `null` equivale a no enviarlo.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address_line1: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address_line2: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub postcode: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub vat_number: Option<Option<String>>,
}

impl UpdateCompanyRequest {
    /// Aplica el parche sobre la fila actual
    pub fn apply_to(self, company: &mut Company) {
        merge(&mut company.name, self.company_name.as_deref().map(normalize_company_name));
        merge_nullable(&mut company.phone, self.phone);
        merge_nullable(&mut company.address_line1, self.address_line1);
        merge_nullable(&mut company.address_line2, self.address_line2);
        merge_nullable(&mut company.city, self.city);
        merge_nullable(&mut company.postcode, self.postcode);
        merge_nullable(&mut company.vat_number, self.vat_number);
    }
}

impl Validate for UpdateCompanyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(name) = &self.company_name {
            collect(&mut errors, "companyName", validate_not_empty(name));
            collect(&mut errors, "companyName", validate_max_length(name, 255));
        }

        let limits: [(&'static str, &Option<Option<String>>, usize); 6] = [
            ("phone", &self.phone, 50),
            ("addressLine1", &self.address_line1, 255),
            ("addressLine2", &self.address_line2, 255),
            ("city", &self.city, 100),
            ("postcode", &self.postcode, 20),
            ("vatNumber", &self.vat_number, 50),
        ];
        for (field, value, max) in limits {
            if let Some(Some(value)) = value {
                collect(&mut errors, field, validate_max_length(value, max));
            }
        }

        finish(errors)
    }
}

// Response de confirmación: `{"success": true}`
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
