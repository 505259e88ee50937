//! Calculation errors.

use thiserror::Error;

use opsboard_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Unit symbol is not in the conversion table.
    #[error("invalid unit: {0:?}")]
    InvalidUnit(String),

    /// Input could not be parsed as a date or timestamp.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

impl From<InventoryError> for DomainError {
    fn from(err: InventoryError) -> Self {
        DomainError::validation(err.to_string())
    }
}
