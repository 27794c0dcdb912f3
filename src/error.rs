/// Error types for lightbnb
///
/// This module defines all possible errors that can occur in the data layer.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for lightbnb operations
#[derive(Error, Debug)]
pub enum LightbnbError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before reaching the database
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Another account already uses this email
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// User id does not exist
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// Property id does not exist
    #[error("Property not found: {0}")]
    PropertyNotFound(i64),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for lightbnb operations
pub type Result<T> = std::result::Result<T, LightbnbError>;

/// Convert LightbnbError to a user-friendly error message
impl LightbnbError {
    pub fn user_message(&self) -> String {
        match self {
            LightbnbError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            LightbnbError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            LightbnbError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            LightbnbError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            LightbnbError::InvalidInput(reason) => {
                format!("Invalid input: {}", reason)
            }
            LightbnbError::DuplicateEmail(email) => {
                format!("An account with email '{}' already exists", email)
            }
            LightbnbError::UserNotFound(id) => {
                format!("No user with id {}", id)
            }
            LightbnbError::PropertyNotFound(id) => {
                format!("No property with id {}", id)
            }
            LightbnbError::Generic(msg) => msg.clone(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        LightbnbError::InvalidInput(reason.into())
    }
}
