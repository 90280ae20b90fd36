//! Error types for the Calorie Tracker

use thiserror::Error;

/// Form input errors, raised before anything reaches storage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{field}: not a number")]
    NotANumber { field: &'static str },

    #[error("{field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl FormError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            FormError::NotANumber { field } | FormError::Invalid { field, .. } => field,
        }
    }

    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        FormError::Invalid {
            field,
            message: message.into(),
        }
    }
}
