//! Guided breathing exercise.
//!
//! - `pattern`: the four fixed presets and their keys
//! - `session`: the inhale/hold/exhale countdown state machine

pub mod pattern;
pub mod session;

pub use pattern::{BreathingPattern, PatternKey, presets};
pub use session::{BreathingSession, BreathingSnapshot, Phase, TickOutcome};
