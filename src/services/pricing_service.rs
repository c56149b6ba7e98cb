//! Resolución de importes de un presupuesto
//!
//! Los importes que envía el cliente se guardan tal cual. Los que faltan
//! se derivan del precio trade sin IVA, el margen de la empresa y el IVA
//! británico, redondeando a 2 decimales.

use rust_decimal::{Decimal, RoundingStrategy};
use validator::{ValidationError, ValidationErrors};

use crate::models::quote::QuotePrices;
use crate::utils::errors::AppError;
use crate::utils::validation::{max_money, validate_money};

/// IVA estándar del Reino Unido (20%)
pub fn vat_rate() -> Decimal {
    Decimal::new(20, 2)
}

/// Importes tal como llegan en la petición
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppliedPrices {
    pub trade_price_ex_vat: Decimal,
    pub trade_price_inc_vat: Option<Decimal>,
    pub customer_price_ex_vat: Option<Decimal>,
    pub customer_price_inc_vat: Option<Decimal>,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Error de validación para un importe derivado que no cabe en la columna
fn out_of_range(field: &'static str) -> AppError {
    let mut error = ValidationError::new("money_range");
    error.add_param("max".into(), &max_money().to_string());
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// `amount * factor` redondeado; sin desbordar y dentro de `NUMERIC(12, 2)`
fn derive(field: &'static str, amount: Decimal, factor: Decimal) -> Result<Decimal, AppError> {
    match amount.checked_mul(factor).map(round_money) {
        Some(value) if validate_money(&value).is_ok() => Ok(value),
        _ => Err(out_of_range(field)),
    }
}

/// Completa los importes que faltan
pub fn resolve_prices(
    supplied: SuppliedPrices,
    markup_percentage: Decimal,
) -> Result<QuotePrices, AppError> {
    let trade_ex = supplied.trade_price_ex_vat;
    let markup = Decimal::ONE + markup_percentage / Decimal::ONE_HUNDRED;
    let with_vat = Decimal::ONE + vat_rate();

    let customer_ex = match supplied.customer_price_ex_vat {
        Some(value) => value,
        None => derive("customerPriceExVat", trade_ex, markup)?,
    };
    let trade_inc = match supplied.trade_price_inc_vat {
        Some(value) => value,
        None => derive("tradePriceIncVat", trade_ex, with_vat)?,
    };
    let customer_inc = match supplied.customer_price_inc_vat {
        Some(value) => value,
        None => derive("customerPriceIncVat", customer_ex, with_vat)?,
    };

    Ok(QuotePrices {
        trade_price_ex_vat: trade_ex,
        trade_price_inc_vat: trade_inc,
        customer_price_ex_vat: customer_ex,
        customer_price_inc_vat: customer_inc,
    })
}
