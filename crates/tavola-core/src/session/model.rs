//! Chat session state.
//!
//! One `ChatSession` exists per browsing session on the host site. It
//! lives only in memory and is owned exclusively by its session; all
//! mutation goes through the turn driver in
//! [`machine`](crate::session::machine).

use crate::order::Cart;
use crate::session::ChatMessage;
use serde::{Deserialize, Serialize};

/// The full state of one conversational ordering session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (UUID format).
    pub id: String,
    /// Append-only conversation history.
    pub messages: Vec<ChatMessage>,
    /// Pending draft text from the input box.
    pub input: String,
    /// Whether a gateway call is in flight. At most one per session.
    pub loading: bool,
    /// User-visible error from the last failed turn, if any.
    pub error: Option<String>,
    /// Latches to `true` on the first completed exchange (success or
    /// failure) and never reverts; the host uses it to switch from the
    /// landing view to the chat view.
    pub is_chat_view: bool,
    /// The running, de-duplicated order.
    pub cart: Cart,
    /// Timestamp when the session was created (ISO 8601 format).
    pub created_at: String,
    /// Timestamp of the last state change (ISO 8601 format).
    pub updated_at: String,
}

impl ChatSession {
    /// Creates a fresh idle session.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            messages: Vec::new(),
            input: String::new(),
            loading: false,
            error: None,
            is_chat_view: false,
            cart: Cart::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replaces the pending draft text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Takes the pending error, clearing it from the session.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
