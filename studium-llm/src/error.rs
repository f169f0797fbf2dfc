//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during chat-completion calls
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Missing or unusable credentials
    #[error("LLM authentication error: {0}")]
    Auth(String),

    /// Response carried no choices
    #[error("API response contained no completion")]
    EmptyResponse,

    /// Other error
    #[error("{0}")]
    Other(String),
}
