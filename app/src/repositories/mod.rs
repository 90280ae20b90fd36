//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod entry;
pub mod user;

pub use entry::{CreateEntry, Entry, EntryRepository};
pub use user::{User, UserRepository};
