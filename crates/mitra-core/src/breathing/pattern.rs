//! Breathing pattern presets.
//!
//! Each preset is keyed by its inhale-hold-exhale triple (e.g. `4-7-8`),
//! which is also how it is named on the command line and in config files.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{MitraError, Result};

/// Key identifying one of the fixed breathing presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum PatternKey {
    #[default]
    #[serde(rename = "4-4-4")]
    #[strum(serialize = "4-4-4")]
    Box,
    #[serde(rename = "4-7-8")]
    #[strum(serialize = "4-7-8")]
    Relaxing,
    #[serde(rename = "6-2-6")]
    #[strum(serialize = "6-2-6")]
    Calming,
    #[serde(rename = "5-5-5")]
    #[strum(serialize = "5-5-5")]
    Balanced,
}

impl PatternKey {
    /// Parses a preset key, reporting unknown keys as `NotFound`.
    pub fn parse(key: &str) -> Result<Self> {
        Self::from_str(key.trim()).map_err(|_| MitraError::not_found("breathing pattern", key))
    }

    /// Returns the preset this key names.
    pub fn pattern(self) -> BreathingPattern {
        match self {
            Self::Box => BreathingPattern::new(self, "Box Breathing", 4, 4, 4),
            Self::Relaxing => BreathingPattern::new(self, "Relaxing Breath", 4, 7, 8),
            Self::Calming => BreathingPattern::new(self, "Calming Breath", 6, 2, 6),
            Self::Balanced => BreathingPattern::new(self, "Balanced Breath", 5, 5, 5),
        }
    }
}

/// Phase durations for one breathing preset, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreathingPattern {
    pub key: PatternKey,
    pub label: &'static str,
    pub inhale_seconds: u32,
    pub hold_seconds: u32,
    pub exhale_seconds: u32,
}

impl BreathingPattern {
    const fn new(
        key: PatternKey,
        label: &'static str,
        inhale_seconds: u32,
        hold_seconds: u32,
        exhale_seconds: u32,
    ) -> Self {
        Self {
            key,
            label,
            inhale_seconds,
            hold_seconds,
            exhale_seconds,
        }
    }

    /// Length of one full inhale-hold-exhale cycle.
    pub fn cycle_seconds(&self) -> u32 {
        self.inhale_seconds + self.hold_seconds + self.exhale_seconds
    }
}

impl Default for BreathingPattern {
    fn default() -> Self {
        PatternKey::default().pattern()
    }
}

/// Returns all presets in display order.
pub fn presets() -> Vec<BreathingPattern> {
    PatternKey::iter().map(PatternKey::pattern).collect()
}
