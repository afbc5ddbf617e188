//! Casual mini-games, reduced to their state machines.
//!
//! # Module Structure
//!
//! - `memory`: memory match board
//! - `trivia`: wellness trivia quiz
//! - `color`: color picks with affirmations

pub mod color;
pub mod memory;
pub mod trivia;

pub use color::{ColorCanvas, Mood, Swatch};
pub use memory::{FlipOutcome, MemoryBoard, MemoryCard, SettleOutcome};
pub use trivia::{AnswerFeedback, Question, TriviaQuiz, TriviaView};
