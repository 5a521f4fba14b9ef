use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::errors::CurrencyError;

/// Parses a plain currency string as it appears in sale rows and deduction
/// entries: optional leading sign, optional `$`, thousands commas allowed.
///
/// Accepts `$1,234.56`, `1234.56`, `-$5.00`. Anything else is a parse
/// failure rather than index-sliced guesswork.
pub fn parse_amount(value: &str) -> Result<Decimal, CurrencyError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(CurrencyError::InvalidFormat("value is an empty string".to_string()));
    }

    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value))
    };

    let digits = rest.strip_prefix('$').unwrap_or(rest).replace(',', "");

    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return Err(CurrencyError::InvalidFormat(format!("unrecognized amount {value:?}")));
    }

    let magnitude = Decimal::from_str(&digits)
        .map_err(|error| CurrencyError::Decimal { value: value.to_string(), source: error })?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Parses the wrapped currency format the report prints for exchange and
/// return totals, e.g. `-($12.34)` or `($12.34)`.
///
/// The wrapper is presentation only; the inner magnitude is the value that
/// gets bucketed. A bare amount without the parenthesis wrapper is also
/// accepted.
pub fn parse_wrapped_amount(value: &str) -> Result<Decimal, CurrencyError> {
    let value = value.trim();
    let unsigned = value.strip_prefix('-').unwrap_or(value);

    let inner = match unsigned.strip_prefix('(') {
        Some(rest) => rest.strip_suffix(')').ok_or_else(|| {
            CurrencyError::InvalidFormat(format!("unbalanced parentheses in {value:?}"))
        })?,
        None => unsigned
    };

    parse_amount(inner)
}
