/// lightbnb library
///
/// Data-access layer for the LightBnB property rental app.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::{LightbnbError, Result};
