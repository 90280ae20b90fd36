//! Calorie Tracker Shared Library
//!
//! This crate contains the storage-independent parts of the tracker: the
//! BMR/TDEE formulas, calorie arithmetic, form validation and the built-in
//! message tables.

pub mod errors;
pub mod health_metrics;
pub mod i18n;
pub mod models;
pub mod nutrition;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use i18n::{Locale, Message};
pub use models::*;
pub use nutrition::*;
