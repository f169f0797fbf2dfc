//! Error types for Studium

use thiserror::Error;

/// Result type alias for Studium operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Studium operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Input validation error
    #[error("{0}")]
    Validation(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
