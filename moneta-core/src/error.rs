//! Error types for the optimizer and its calculators.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonetaError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MonetaError {
    #[error("invalid amount: {0} (must be finite and non-negative)")]
    InvalidAmount(f64),

    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid statement day {0} (expected 1..=31)")]
    InvalidStatementDay(u32),

    #[error("invalid card '{id}': {reason}")]
    InvalidCard { id: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MonetaError {
    pub fn invalid_date(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        MonetaError::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
