/// Database module for lightbnb
///
/// Handles all database operations using SQLite and sqlx.
/// Implements connection pooling for performance.

pub mod connection;
pub mod filters;
pub mod models;
pub mod queries;

pub use connection::{Database, DatabaseStats};
pub use models::*;
