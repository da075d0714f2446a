//! # Pricing Error Types
//!
//! Typed error handling for the pricing engine.
//! All pricing operations return `Result<T, PricingError>`.

use thiserror::Error;

/// Error raised while evaluating a pricing request.
///
/// Every variant carries the offending request rendered as JSON so operators
/// can see what was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A required key is absent from the request
    #[error("Pricing error: Missing key '{field}' in data: {input}")]
    MissingField { field: String, input: String },

    /// A field is present but cannot be interpreted
    #[error("Pricing error: Invalid input type - {field}: {message}, data: {input}")]
    InvalidType {
        field: String,
        message: String,
        input: String,
    },

    /// Anything else that went wrong during evaluation
    #[error("Pricing error: An unexpected error occurred - {message}, data: {input}")]
    UnexpectedError { message: String, input: String },
}

impl PricingError {
    /// Name of the field at fault, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            PricingError::MissingField { field, .. } | PricingError::InvalidType { field, .. } => {
                Some(field)
            }
            PricingError::UnexpectedError { .. } => None,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PricingError::MissingField { .. } => 400,
            PricingError::InvalidType { .. } => 400,
            PricingError::UnexpectedError { .. } => 500,
        }
    }
}

/// Errors raised while loading a rate table
#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("Failed to parse rate table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Negative amount for '{name}' in rate table")]
    NegativeAmount { name: String },

    #[error("Duplicate entry '{name}' in rate table")]
    Duplicate { name: String },
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
