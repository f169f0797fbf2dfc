//! Wire types for the chat-completions API

use serde::{Deserialize, Serialize};
use studium_core::context::Message;

/// Generation options sent with each request
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            max_tokens: 6000,
            temperature: 0.7,
            top_p: 1.0,
            top_k: 1,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

impl ChatOptions {
    /// Set the token budget for the completion
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
    #[serde(flatten)]
    pub options: &'a ChatOptions,
}

/// Non-streaming response body
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: String,
}

/// One server-sent chunk of a streaming response
#[derive(Debug, Deserialize)]
pub(crate) struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamChoice {
    #[serde(default)]
    pub delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Delta {
    #[serde(default)]
    pub content: Option<String>,
}
