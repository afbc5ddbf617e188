//! Chat companion module.
//!
//! # Module Structure
//!
//! - `reply`: keyword classification and canned reply pools
//! - `message`: the `ChatMessage` record
//! - `transcript`: the append-only conversation log

pub mod message;
pub mod reply;
pub mod transcript;

// Re-export public API
pub use message::ChatMessage;
pub use reply::{ReplyCategory, classify, classify_and_reply};
pub use transcript::{Transcript, greeting};
