//! Currency conversion over a [`RateTable`] and money display rounding.
//!
//! Conversion goes through the dollar: `amount / rate(from) * rate(to)`.
//! The computed value keeps full `f64` precision; rounding to the target's
//! minor units is a separate display step ([`format_amount`]).

use serde::Serialize;

use crate::domain::validate_non_negative;
use crate::{AsOfDate, CoreError, CurrencyCode, RateTable, ValidationError};

/// Currencies without a minor unit in everyday use.
const ZERO_DECIMAL: &[&str] = &[
    "bif", "clp", "djf", "gnf", "isk", "jpy", "kmf", "krw", "pyg", "rwf", "ugx", "uyi", "vnd",
    "vuv", "xaf", "xof", "xpf",
];

/// Currencies subdivided into thousandths.
const THREE_DECIMAL: &[&str] = &["bhd", "iqd", "jod", "kwd", "lyd", "omr", "tnd"];

/// Convert `amount` of `from` into `to` using `table`.
///
/// Both codes must be present in the table; a missing code is reported as
/// [`crate::LookupError::CurrencyNotInTable`] instead of producing 0 or NaN.
/// A result that overflows `f64` is rejected the same way a non-finite
/// amount is.
pub fn exchange(
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &RateTable,
) -> Result<f64, CoreError> {
    validate_non_negative("amount", amount)?;
    // -0.0 passes the sign check; fold it into 0.0.
    let amount = amount + 0.0;

    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;

    if from == to {
        return Ok(amount);
    }

    let result = amount / from_rate * to_rate;
    if !result.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "result" }.into());
    }
    Ok(result)
}

/// Number of decimal digits conventionally shown for `code`.
pub fn minor_units(code: &CurrencyCode) -> u32 {
    let code = code.as_str();
    if ZERO_DECIMAL.contains(&code) {
        0
    } else if THREE_DECIMAL.contains(&code) {
        3
    } else {
        2
    }
}

/// Round half away from zero to the minor units of `code`.
pub fn round_to_minor_units(value: f64, code: &CurrencyCode) -> f64 {
    let scale = 10_f64.powi(minor_units(code) as i32);
    (value * scale).round() / scale
}

/// Fixed-precision display string for a money value, e.g. `8300.00` or `15037`.
pub fn format_amount(value: f64, code: &CurrencyCode) -> String {
    let digits = minor_units(code) as usize;
    format!("{:.*}", digits, round_to_minor_units(value, code))
}

/// A completed conversion, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub result: f64,
    pub display: String,
    pub as_of: AsOfDate,
}

impl RateTable {
    /// Convert and package the result with its display form and table date.
    pub fn convert(
        &self,
        amount: f64,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Conversion, CoreError> {
        let result = exchange(amount, from, to, self)?;
        Ok(Conversion {
            amount: amount + 0.0,
            from: from.clone(),
            to: to.clone(),
            result,
            display: format_amount(result, to),
            as_of: self.date(),
        })
    }
}
