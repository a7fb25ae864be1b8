//! Error types for lingo-core.

use thiserror::Error;

/// Result type alias using ProgressError.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that can occur while applying a quiz completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("invalid {field}: {value} (expected {min}..={max})")]
    InvalidInput {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ProgressError {
    pub(crate) fn out_of_range(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::InvalidInput {
            field,
            value,
            min,
            max,
        }
    }
}
