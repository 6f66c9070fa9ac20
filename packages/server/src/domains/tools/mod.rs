//! Tools domain - catalog entries and their scheduled publication

pub mod activities;
pub mod models;
pub mod restate;
pub mod store;
pub mod templates;

pub use models::{Tool, ToolStatus};
pub use store::{PgToolStore, ToolStore};
