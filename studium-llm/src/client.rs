//! Chat-completions API client

use futures_util::StreamExt;
use studium_core::context::Message;
use studium_core::{Config, Secrets};
use tracing::{debug, info};

use crate::types::{ChatOptions, ChatRequest, ChatResponse, StreamChunk};
use crate::{Error, Result};

/// Completions larger than this are requested as a stream so long
/// generations are not cut off by response buffering
pub const STREAMING_THRESHOLD_TOKENS: u32 = 5000;

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct ChatClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl ChatClient {
    /// Create a client with explicit endpoint, model, and key
    pub fn new(
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from configuration.
    ///
    /// The API key is loaded from (in priority order):
    /// 1. STUDIUM_API_KEY / FIREWORKS_API_KEY environment variables
    /// 2. ~/.config/studium/secrets.toml
    pub fn from_config(config: &Config) -> Result<Self> {
        let secrets = Secrets::load().map_err(|e| Error::Auth(e.to_string()))?;

        let api_key = secrets.api_key().ok_or_else(|| {
            Error::Auth(
                "API key not found. Set STUDIUM_API_KEY environment variable \
                 or add the key to ~/.config/studium/secrets.toml"
                    .to_string(),
            )
        })?;

        info!(api_url = %config.llm.api_url, model = %config.llm.model, "Created chat client");

        Ok(Self::new(
            config.llm.api_url.clone(),
            config.llm.model.clone(),
            api_key,
        ))
    }

    /// Get the model identifier this client sends
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a chat request and return the completion text.
    ///
    /// Requests with `max_tokens` above [`STREAMING_THRESHOLD_TOKENS`] are
    /// made with `stream: true` and the streamed deltas are collected into
    /// one string; smaller requests use a plain JSON response.
    pub async fn chat(&self, messages: &[Message], options: &ChatOptions) -> Result<String> {
        let use_streaming = options.max_tokens > STREAMING_THRESHOLD_TOKENS;

        debug!(
            model = %self.model,
            messages = messages.len(),
            max_tokens = options.max_tokens,
            streaming = use_streaming,
            "Sending chat request"
        );

        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: use_streaming,
            options,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        if use_streaming {
            self.collect_stream(response).await
        } else {
            let body: ChatResponse = response.json().await?;
            body.choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or(Error::EmptyResponse)
        }
    }

    /// Collect a server-sent-event stream into the full completion text.
    ///
    /// Malformed chunks are skipped rather than failing the whole
    /// generation; the stream ends at the `[DONE]` sentinel.
    async fn collect_stream(&self, response: reqwest::Response) -> Result<String> {
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut content = String::new();

        'recv: while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                let line = line.trim();

                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };
                if data.trim() == "[DONE]" {
                    break 'recv;
                }

                let Ok(parsed) = serde_json::from_str::<StreamChunk>(data) else {
                    continue;
                };
                if let Some(delta) = parsed
                    .choices
                    .first()
                    .and_then(|choice| choice.delta.content.as_deref())
                {
                    content.push_str(delta);
                }
            }
        }

        debug!(bytes = content.len(), "Collected streamed completion");

        Ok(content)
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
