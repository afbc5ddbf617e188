//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// The message body, as typed or as selected from a reply pool.
    pub text: String,
    /// `true` for user submissions, `false` for companion replies.
    pub is_from_user: bool,
    /// When the message was created.
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, is_from_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_from_user,
            sent_at: Utc::now(),
        }
    }

    /// Creates a message authored by the user.
    pub fn from_user(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// Creates a message authored by the companion.
    pub fn from_companion(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}
