//! Catalog domain - alternatives, categories and licenses, plus the admin
//! cross-entity search

pub mod activities;
pub mod models;
pub mod restate;

pub use models::{Alternative, Category, License};
