//! Error types for form operations

use thiserror::Error;

/// Errors raised by the form store and rule construction
#[derive(Debug, Error)]
pub enum FormError {
    /// A caller referenced a field the form does not have
    #[error("field not found: {key}")]
    FieldNotFound { key: String },

    /// A validation pattern failed to compile
    #[error("invalid pattern {pattern:?} for field {field}: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl FormError {
    pub fn field_not_found(key: impl Into<String>) -> Self {
        FormError::FieldNotFound { key: key.into() }
    }
}
