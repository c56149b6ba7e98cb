//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y el extractor `ValidatedJson`, que deserializa y valida el body
//! devolviendo siempre nuestro formato de error.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::errors::AppError;

lazy_static! {
    /// Colores de branding en formato `#RRGGBB`
    pub static ref HEX_COLOUR: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Validar formato de color hexadecimal
pub fn validate_hex_colour(value: &str) -> Result<(), ValidationError> {
    if !HEX_COLOUR.is_match(value) {
        let mut error = ValidationError::new("hex_colour");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

/// Validar longitud máxima (en caracteres)
pub fn validate_max_length(value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        let mut error = ValidationError::new("length");
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Mayor importe que cabe en una columna `NUMERIC(12, 2)`
pub fn max_money() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Validar un importe: no negativo, como mucho 2 decimales y dentro de
/// `NUMERIC(12, 2)`, para que se guarde sin redondeos ni errores de la base
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    let code = if value.is_sign_negative() && !value.is_zero() {
        Some("non_negative")
    } else if value.normalize().scale() > 2 {
        Some("money_scale")
    } else if *value > max_money() {
        Some("money_range")
    } else {
        None
    };

    match code {
        Some(code) => {
            let mut error = ValidationError::new(code);
            error.add_param("value".into(), &value.to_string());
            error.add_param("max".into(), &max_money().to_string());
            Err(error)
        }
        None => Ok(()),
    }
}

/// Acumula el resultado de una validación de campo en `errors`
pub fn collect(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<(), ValidationError>,
) {
    if let Err(error) = result {
        errors.add(field, error);
    }
}

/// Convierte los errores acumulados en `Result`
pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Extractor JSON que responde 400 con nuestro `ErrorResponse` si el body
/// no se puede deserializar, y ejecuta `Validate` antes de llegar al handler.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
            })?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colour() {
        assert!(validate_hex_colour("#1e3a5f").is_ok());
        assert!(validate_hex_colour("#ABCDEF").is_ok());
        assert!(validate_hex_colour("1e3a5f").is_err());
        assert!(validate_hex_colour("#1e3a5").is_err());
        assert!(validate_hex_colour("#1e3a5g").is_err());
    }

    #[test]
    fn test_money() {
        assert!(validate_money(&Decimal::new(50000, 2)).is_ok());
        assert!(validate_money(&Decimal::ZERO).is_ok());
        assert!(validate_money(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_money_upper_bound() {
        assert!(validate_money(&max_money()).is_ok());
        assert!(validate_money(&Decimal::new(1_000_000_000_000, 0)).is_err());
        let huge: Decimal = "70000000000000000000000000000".parse().unwrap();
        let error = validate_money(&huge).unwrap_err();
        assert_eq!(error.code, "money_range");
    }

    #[test]
    fn test_money_scale() {
        assert_eq!(validate_money(&Decimal::new(12345, 3)).unwrap_err().code, "money_scale");
        // Ceros a la derecha no cuentan como decimales
        assert!(validate_money(&Decimal::new(12500, 3)).is_ok());
    }

    #[test]
    fn test_collect_and_finish() {
        let mut errors = ValidationErrors::new();
        collect(&mut errors, "company_name", validate_not_empty("  "));
        collect(&mut errors, "city", validate_max_length("Leeds", 100));
        let result = finish(errors);
        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("company_name"));
        assert!(!errors.field_errors().contains_key("city"));
    }
}
