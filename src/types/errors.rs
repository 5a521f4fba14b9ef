use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("Currency error: {0}")]
    InvalidFormat(String),
    #[error("Currency error: {value:?} is not a decimal amount")]
    Decimal {
        value: String,
        source: rust_decimal::Error
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Unit price must be non-negative, got {unit_price}")]
    NegativeUnitPrice {
        unit_price: Decimal
    }
}
