use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::updater::{DisplayTarget, DEFAULT_TARGET_ID};

/// Nominal tick period in milliseconds.
pub const DEFAULT_PERIOD_MS: u64 = 50;

/// Settings for a display updater host.
///
/// Precedence is defaults, then a JSON file, then explicit overrides (CLI
/// flags). Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Identifier of the display element.
    pub target_id: String,
    /// Tick period in milliseconds. Must be non-zero.
    pub period_ms: u64,
    /// Stop after this many ticks. `None` runs until the host shuts down.
    pub max_ticks: Option<u64>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            target_id: DEFAULT_TARGET_ID.to_string(),
            period_ms: DEFAULT_PERIOD_MS,
            max_ticks: None,
        }
    }
}

impl UpdaterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file. Malformed content is a [`CoreError::Parse`]
    /// naming the file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| CoreError::Parse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply explicit overrides on top of this config. `None` keeps the
    /// current value.
    pub fn apply_overrides(
        &mut self,
        target_id: Option<String>,
        period_ms: Option<u64>,
        max_ticks: Option<u64>,
    ) {
        if let Some(target_id) = target_id {
            self.target_id = target_id;
        }
        if let Some(period_ms) = period_ms {
            self.period_ms = period_ms;
        }
        if max_ticks.is_some() {
            self.max_ticks = max_ticks;
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.target_id.is_empty() {
            return Err(CoreError::Config {
                message: "target_id must not be empty".to_string(),
            });
        }
        // An HTML id never contains whitespace, so such a target cannot resolve.
        if self.target_id.chars().any(char::is_whitespace) {
            return Err(CoreError::Config {
                message: format!("target_id {:?} must not contain whitespace", self.target_id),
            });
        }
        if self.period_ms == 0 {
            return Err(CoreError::Config {
                message: "period_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn target(&self) -> DisplayTarget {
        DisplayTarget::new(self.target_id.clone())
    }
}
