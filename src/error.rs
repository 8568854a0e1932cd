//! Error types for the vitalscore engine

use thiserror::Error;

/// Errors that can occur while validating, encoding, or scoring a reading
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Feature encoding failed: {0}")]
    Encoding(String),

    #[error("Risk model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Risk prediction failed: {0}")]
    Prediction(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Artifact read error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RiskError {
    /// Field-level validation failure, the recoverable kind surfaced to callers.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RiskError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures a caller can correct by fixing the submitted reading.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RiskError::ModelUnavailable(_))
    }
}
