//! Error types for input validation and table/case loading
//!
//! Domain infeasibility is never an error: it is reported through
//! `CalculationResult::liquidation_value_violation`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RehabError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    #[error("No living cost table for year {0}")]
    UnknownTableYear(i32),

    #[error("Malformed living cost table: {0}")]
    MalformedTable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RehabError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RehabError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RehabError>;
