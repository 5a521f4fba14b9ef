use thiserror::Error;

use crate::models::TransactionRow;
use crate::report::ParseError;
use crate::types::{CurrencyError, ScheduleError};

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Row [{transaction_number}]: bad {field} value | {source}")]
    Currency {
        transaction_number: String,
        field: &'static str,
        source: CurrencyError
    },
    #[error("Row [{transaction_number}]: {source}")]
    Schedule {
        transaction_number: String,
        source: ScheduleError
    },
    #[error("Row [{transaction_number}]: quantity {quantity:?} is not a whole number")]
    Quantity {
        transaction_number: String,
        quantity: String
    }
}

impl ClassifyError {
    pub fn currency(row: &TransactionRow, field: &'static str, source: CurrencyError) -> Self {
        Self::Currency {
            transaction_number: row.transaction_number.clone(),
            field,
            source
        }
    }

    pub fn schedule(row: &TransactionRow, source: ScheduleError) -> Self {
        Self::Schedule {
            transaction_number: row.transaction_number.clone(),
            source
        }
    }

    pub fn quantity(row: &TransactionRow) -> Self {
        Self::Quantity {
            transaction_number: row.transaction_number.clone(),
            quantity: row.quantity.clone()
        }
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error("Deduction entry for the {label} is not a valid amount | {source}")]
    Deduction {
        label: &'static str,
        source: CurrencyError
    },
    #[error("Too many deduction entries: {count} supplied, one per bracket at most")]
    TooManyDeductions {
        count: usize
    }
}
