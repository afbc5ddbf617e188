//! The breathing phase timer.
//!
//! A `BreathingSession` is a plain state machine advanced by `tick()`; it
//! owns no clock. Whoever drives it is responsible for delivering one tick
//! per second while it is running and none otherwise.

use serde::Serialize;
use strum::Display;

use super::pattern::{BreathingPattern, PatternKey};

/// One stage of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            Self::Inhale => Self::Hold,
            Self::Hold => Self::Exhale,
            Self::Exhale => Self::Inhale,
        }
    }

    /// Short instruction shown to the user during this phase.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::Hold => "Hold",
            Self::Exhale => "Breathe Out",
        }
    }

    /// Configured duration of this phase in `pattern`.
    pub fn duration_in(self, pattern: &BreathingPattern) -> u32 {
        match self {
            Self::Inhale => pattern.inhale_seconds,
            Self::Hold => pattern.hold_seconds,
            Self::Exhale => pattern.exhale_seconds,
        }
    }
}

/// What a single tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is paused; nothing changed.
    Idle,
    /// The countdown moved by one second within the current phase.
    Counted,
    /// The countdown ran out and the session entered `phase`.
    PhaseChanged { phase: Phase },
    /// The exhale ran out and a new cycle started.
    CycleCompleted { completed_cycles: u32 },
}

/// A copy of the session state for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreathingSnapshot {
    pub pattern: BreathingPattern,
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub completed_cycles: u32,
    pub running: bool,
}

/// The transient state of a guided breathing exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathingSession {
    pattern: BreathingPattern,
    phase: Phase,
    seconds_remaining: u32,
    completed_cycles: u32,
    running: bool,
}

impl BreathingSession {
    /// Creates a stopped session at the start of the inhale for `key`.
    pub fn new(key: PatternKey) -> Self {
        let pattern = key.pattern();
        Self {
            pattern,
            phase: Phase::Inhale,
            seconds_remaining: pattern.inhale_seconds,
            completed_cycles: 0,
            running: false,
        }
    }

    pub fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> BreathingSnapshot {
        BreathingSnapshot {
            pattern: self.pattern,
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            completed_cycles: self.completed_cycles,
            running: self.running,
        }
    }

    /// Starts or resumes the exercise.
    ///
    /// A paused session resumes from its current phase and remaining time,
    /// unless the countdown is already at zero, in which case it restarts
    /// at the inhale.
    pub fn start(&mut self) {
        self.running = true;
        if self.seconds_remaining == 0 {
            self.phase = Phase::Inhale;
            self.seconds_remaining = self.pattern.inhale_seconds;
        }
    }

    /// Stops ticking without losing the phase or remaining time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops the exercise and rewinds to the first inhale.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = Phase::Inhale;
        self.seconds_remaining = self.pattern.inhale_seconds;
        self.completed_cycles = 0;
    }

    /// Switches to another preset. Always implies a reset.
    pub fn select_pattern(&mut self, key: PatternKey) {
        self.pattern = key.pattern();
        self.reset();
    }

    /// Advances the session by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
        }
        if self.seconds_remaining > 0 {
            return TickOutcome::Counted;
        }

        let next = self.phase.next();
        self.phase = next;
        self.seconds_remaining = next.duration_in(&self.pattern);

        if next == Phase::Inhale {
            self.completed_cycles += 1;
            TickOutcome::CycleCompleted {
                completed_cycles: self.completed_cycles,
            }
        } else {
            TickOutcome::PhaseChanged { phase: next }
        }
    }
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new(PatternKey::default())
    }
}
