//! The in-memory chat transcript.

use super::message::ChatMessage;

/// Builds the opening line the companion greets with.
pub fn greeting(companion_name: &str) -> String {
    format!(
        "Hello! I'm {}, your AI companion for mental wellness. I'm here to listen, support, and help you navigate your thoughts and feelings. How are you feeling today?",
        companion_name
    )
}

/// An append-only, ordered record of the conversation.
///
/// Messages are never edited or removed; the transcript lives as long as
/// the owning session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript that opens with the companion's greeting.
    pub fn with_greeting(companion_name: &str) -> Self {
        let mut transcript = Self::new();
        transcript
            .messages
            .push(ChatMessage::from_companion(greeting(companion_name)));
        transcript
    }

    /// Records a user submission.
    ///
    /// Blank or whitespace-only input is rejected and `None` is returned;
    /// the transcript is left untouched.
    pub fn submit(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::from_user(text));
        self.messages.last()
    }

    /// Records a companion reply.
    pub fn push_reply(&mut self, text: &str) -> &ChatMessage {
        self.messages.push(ChatMessage::from_companion(text));
        // Just pushed, so the transcript is non-empty
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
