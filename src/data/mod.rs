//! Data layer module
//!
//! Handles all data persistence:
//! - SQLite database operations (sqlx)
//! - Newspaper snapshot documents and the settings table

mod database;
mod models;

pub use database::Database;
pub use models::*;
