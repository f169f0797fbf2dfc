//! Conversation context for course-definition chats
//!
//! The chat that narrows a user down to a course topic needs three views of
//! its history: a short window sent with each completion request, a longer
//! window kept around at all, and a small tail used to extract the course
//! name once the user commits. The limits live here as named constants so
//! every caller trims the same way.

use serde::{Deserialize, Serialize};

/// Messages sent along with each completion request
pub const REPLY_WINDOW: usize = 10;

/// Messages retained in the context; older messages are discarded on push
pub const STORAGE_LIMIT: usize = 20;

/// Messages examined when extracting a course name from the conversation
pub const NAME_WINDOW: usize = 6;

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Explicit per-conversation state: message history and the quick-reply
/// button labels offered alongside the last assistant turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatContext {
    history: Vec<Message>,
    buttons: Vec<String>,
}

impl ChatContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, discarding the oldest beyond [`STORAGE_LIMIT`]
    pub fn push(&mut self, message: Message) {
        self.history.push(message);
        if self.history.len() > STORAGE_LIMIT {
            let excess = self.history.len() - STORAGE_LIMIT;
            self.history.drain(..excess);
        }
    }

    /// Full retained history, oldest first
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The last [`REPLY_WINDOW`] messages, for a completion request
    pub fn reply_window(&self) -> &[Message] {
        tail(&self.history, REPLY_WINDOW)
    }

    /// The last [`NAME_WINDOW`] messages, for course-name extraction
    pub fn name_window(&self) -> &[Message] {
        tail(&self.history, NAME_WINDOW)
    }

    /// Replace the quick-reply buttons for the current turn
    pub fn set_buttons(&mut self, buttons: Vec<String>) {
        self.buttons = buttons;
    }

    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }
}

fn tail(messages: &[Message], limit: usize) -> &[Message] {
    let start = messages.len().saturating_sub(limit);
    &messages[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(count: usize) -> ChatContext {
        let mut context = ChatContext::new();
        for i in 0..count {
            context.push(Message::user(format!("message {}", i)));
        }
        context
    }

    #[test]
    fn test_push_keeps_storage_limit() {
        let context = filled(STORAGE_LIMIT + 5);
        assert_eq!(context.history().len(), STORAGE_LIMIT);
        // Oldest messages were dropped
        assert_eq!(context.history()[0].content, "message 5");
    }

    #[test]
    fn test_reply_window_is_last_ten() {
        let context = filled(STORAGE_LIMIT);
        let window = context.reply_window();
        assert_eq!(window.len(), REPLY_WINDOW);
        assert_eq!(window.last().unwrap().content, "message 19");
    }

    #[test]
    fn test_name_window_is_last_six() {
        let context = filled(STORAGE_LIMIT);
        assert_eq!(context.name_window().len(), NAME_WINDOW);
    }

    #[test]
    fn test_windows_on_short_history() {
        let context = filled(3);
        assert_eq!(context.reply_window().len(), 3);
        assert_eq!(context.name_window().len(), 3);
    }

    #[test]
    fn test_buttons_replaced_per_turn() {
        let mut context = ChatContext::new();
        context.set_buttons(vec!["Yes".to_string(), "No".to_string()]);
        assert_eq!(context.buttons().len(), 2);
        context.set_buttons(vec!["Continue".to_string()]);
        assert_eq!(context.buttons(), ["Continue"]);
    }
}
