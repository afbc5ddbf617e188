//! Companion configuration.
//!
//! Loaded from `~/.config/mitra/config.toml` (platform config dir via
//! `dirs`). Every key is optional; a missing file means all defaults.
//!
//! ```toml
//! companion_name = "Mitra"
//! reply_delay_ms = 1500
//! tick_interval_ms = 1000
//! memory_settle_ms = 1000
//! default_pattern = "4-7-8"
//! seed = 42
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::breathing::PatternKey;
use crate::error::{MitraError, Result};

const APP_DIR: &str = "mitra";
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MitraConfig {
    /// Name the companion introduces itself with.
    pub companion_name: String,
    /// Artificial latency before a chat reply appears.
    pub reply_delay_ms: u64,
    /// Period of the breathing tick.
    pub tick_interval_ms: u64,
    /// How long a revealed memory pair stays up before it settles.
    pub memory_settle_ms: u64,
    /// Breathing preset selected at startup.
    pub default_pattern: PatternKey,
    /// Fixed random seed; entropy is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MitraConfig {
    fn default() -> Self {
        Self {
            companion_name: "Mitra".to_string(),
            reply_delay_ms: 1500,
            tick_interval_ms: 1000,
            memory_settle_ms: 1000,
            default_pattern: PatternKey::default(),
            seed: None,
        }
    }
}

impl MitraConfig {
    /// Default config file location, if a config dir can be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Default log directory (`<data_dir>/mitra/logs`).
    pub fn default_log_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("logs"))
    }

    /// Loads the config at `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(target: "config", "No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the runtime cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(MitraError::config("tick_interval_ms must be greater than 0"));
        }
        if self.companion_name.trim().is_empty() {
            return Err(MitraError::config("companion_name must not be empty"));
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn memory_settle_delay(&self) -> Duration {
        Duration::from_millis(self.memory_settle_ms)
    }
}
