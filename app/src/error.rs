//! Application error handling
//!
//! This module provides unified error handling for the services and the
//! view-model. User-correctable errors become a warning shown to the user;
//! everything else is logged and reported generically.

use calorie_tracker_shared::validation::{get_field_display_label, is_user_field};
use calorie_tracker_shared::{FormError, Locale, Message};
use thiserror::Error;
use tracing::error;

/// Tracker error type
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    Form(#[from] FormError),

    #[error("No user selected")]
    NoUserSelected,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl TrackerError {
    /// Whether the user can fix this by re-entering data
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TrackerError::Validation(_)
                | TrackerError::Form(_)
                | TrackerError::NoUserSelected
                | TrackerError::NotFound(_)
        )
    }

    /// Text of the warning shown to the user
    pub fn warning(&self, locale: Locale) -> String {
        match self {
            TrackerError::Form(err) => {
                let headline = if is_user_field(err.field()) {
                    Message::InvalidUserData
                } else {
                    Message::InvalidCalories
                };
                format!(
                    "{} ({}: {})",
                    headline.text(locale),
                    get_field_display_label(err.field()),
                    form_detail(err)
                )
            }
            TrackerError::NoUserSelected => Message::SelectUserFirst.text(locale).to_string(),
            TrackerError::Validation(msg) | TrackerError::NotFound(msg) => msg.clone(),
            TrackerError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
        }
    }
}

fn form_detail(err: &FormError) -> String {
    match err {
        FormError::NotANumber { .. } => "not a number".to_string(),
        FormError::Invalid { message, .. } => message.clone(),
    }
}

/// Result type alias for services and the view-model
pub type TrackerResult<T> = Result<T, TrackerError>;
