//! Domain logic for the Mitra wellness companion.
//!
//! Everything here is synchronous and clock-free: the chat reply selector,
//! the breathing phase timer and the mini-games are plain state machines
//! that take an injected random source where they need one. Timing lives
//! in `mitra-execution`.

pub mod breathing;
pub mod companion;
pub mod config;
pub mod error;
pub mod games;

// Re-export common types
pub use config::MitraConfig;
pub use error::{MitraError, Result};
