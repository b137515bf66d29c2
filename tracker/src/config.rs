use std::path::Path;

use clock::{ClockConfig, DEFAULT_SESSION_SECS};
use serde::{Deserialize, Serialize};
use types::DEFAULT_POINTS_CONDITION;

use crate::error::{Result, TrackerError};

pub const DEFAULT_DATABASE_FILE: &str = "sqlite://duel_tracker.db";
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub database_url: Option<String>,
    pub session_length_secs: u32,
    /// Catalog name of the generic points victory.
    pub points_condition: String,
    pub recent_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_url: Some(DEFAULT_DATABASE_FILE.to_string()),
            session_length_secs: DEFAULT_SESSION_SECS,
            points_condition: DEFAULT_POINTS_CONDITION.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl TrackerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| TrackerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&yaml)?;
        if config.session_length_secs == 0 {
            return Err(TrackerError::Config(
                "session_length_secs must be positive".to_string(),
            ));
        }
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig::with_session_length(self.session_length_secs)
    }
}
