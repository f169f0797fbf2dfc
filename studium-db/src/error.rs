//! Error types for database operations

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum Error {
    /// SQLx database error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;

/// Map a unique-constraint violation to [`Error::AlreadyExists`]
pub(crate) fn map_unique(err: sqlx::Error, what: impl Into<String>) -> Error {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        Error::AlreadyExists(what.into())
    } else {
        Error::Sqlx(err)
    }
}
