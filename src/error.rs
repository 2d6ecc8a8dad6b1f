//! Custom error types for subtrack
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for subtrack operations
#[derive(Error, Debug)]
pub enum SubtrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// A date that is not a real calendar date, or could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SubtrackError {
    /// Create a "not found" error for subscriptions
    pub fn subscription_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Subscription",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for subscriptions
    pub fn duplicate_subscription(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Subscription",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SubtrackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SubtrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for subtrack operations
pub type SubtrackResult<T> = Result<T, SubtrackError>;
