//! Conversation message types.
//!
//! This module contains the wire-level message shape consumed by the remote
//! capability and the per-turn record kept in the conversation history.

use crate::signals::SignalSet;
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message.
    System,
}

/// A single message in the shape the completion capability consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// One completed request/response exchange within a session.
///
/// Records are immutable once created and only live inside the bounded
/// conversation history; nothing is persisted beyond the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Raw text the user sent.
    pub user_text: String,
    /// Text returned to the user for this turn.
    pub response_text: String,
    /// Signals computed for the user text.
    pub signals: SignalSet,
    /// Timestamp when the turn completed (ISO 8601 format).
    pub timestamp: String,
}

impl TurnRecord {
    /// Creates a record stamped with the current UTC time.
    pub fn new(
        user_text: impl Into<String>,
        response_text: impl Into<String>,
        signals: SignalSet,
    ) -> Self {
        Self {
            user_text: user_text.into(),
            response_text: response_text.into(),
            signals,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
