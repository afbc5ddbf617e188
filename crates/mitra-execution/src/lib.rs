//! Event-driven runtime for the Mitra companion.
//!
//! Owns the domain state from `mitra-core`, delivers breathing ticks and
//! delayed replies through cancellable timers, and streams `Update`s to the
//! presentation layer.

pub mod command;
mod runtime;
pub mod telemetry;
pub mod timer;

pub use command::{
    BreathingCommand, ColorCommand, Command, MemoryCommand, TriviaCommand, Update,
};
pub use runtime::{RuntimeHandle, spawn};
