//! Messages into and out of the companion runtime.

use mitra_core::breathing::{BreathingSnapshot, PatternKey};
use mitra_core::companion::ChatMessage;
use mitra_core::games::{AnswerFeedback, MemoryCard, Swatch, TriviaView};

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text for the chat companion.
    Say(String),
    Breathing(BreathingCommand),
    Memory(MemoryCommand),
    Trivia(TriviaCommand),
    Color(ColorCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingCommand {
    Start,
    Pause,
    Reset,
    SelectPattern(PatternKey),
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryCommand {
    NewGame,
    /// Flip the card with this zero-based id.
    Flip(usize),
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaCommand {
    /// Answer with this zero-based option index.
    Answer(usize),
    Next,
    Reset,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCommand {
    Pick(Swatch),
    Clear,
}

/// Output for the presentation layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A message was appended to the transcript.
    Message(ChatMessage),
    /// Whether the companion is "typing" (a reply is pending).
    Typing(bool),
    Breathing(BreathingSnapshot),
    Memory {
        cards: Vec<MemoryCard>,
        moves: u32,
        complete: bool,
    },
    TriviaAnswered(AnswerFeedback),
    Trivia(TriviaView),
    Affirmation {
        swatch: Swatch,
        text: &'static str,
        picked: usize,
    },
    CanvasCleared,
    /// A command could not be applied; the reason is user-facing.
    Rejected(String),
}
