//! Studium LLM - Chat-completions client
//!
//! HTTP client for an OpenAI-compatible chat-completions endpoint. Large
//! generations (schedules, study guides) are requested as a stream and
//! collected; small ones use a plain JSON round trip.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ChatClient, STREAMING_THRESHOLD_TOKENS};
pub use error::{Error, Result};
pub use types::ChatOptions;
