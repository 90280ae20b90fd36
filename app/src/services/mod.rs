//! Business logic services
//!
//! Services validate input and coordinate the repositories.

pub mod entry;
pub mod export;
pub mod user;

pub use entry::{today, EntryService};
pub use export::{ExportService, UserDataExport};
pub use user::UserService;
