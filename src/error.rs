//! Error types for the reserving engine

use thiserror::Error;

/// Errors raised by reserve and trend calculations
///
/// A calculation either completes with a full result or fails with one of
/// these; partial results are never returned. Numerical degeneracies (zero
/// denominators in factors, variances, slopes) are handled by fallback
/// values in the estimators and never surface as errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input record violated a field constraint
    #[error("invalid record field `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Not enough data to run the calculation (zero cohorts, zero exposure)
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A persistence write failed after the calculation completed
    ///
    /// The engine façade logs and swallows this; the completed result is
    /// still returned to the caller.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl EngineError {
    /// Convenience constructor for validation failures
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
