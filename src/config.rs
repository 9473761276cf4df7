//! Configuration for the timecube binary

use std::path::Path;

use anyhow::{Context, Result};
use cube_dispatch::{
    OrientationTable, SessionOptions, TimeTrackingAction, TimeTrackingApi, TimeTrackingHandler,
    DEFAULT_CONNECTIVITY_POLL_MS, DEFAULT_CREATED_WITH,
};
use cube_stability::DetectorParameters;
use serde::{Deserialize, Serialize};

/// Timecube configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stability detector parameters
    #[serde(default)]
    pub detector: DetectorParameters,

    /// Projects started by the +x, +y, -x, -y and -z faces
    #[serde(default)]
    pub project_ids: [u64; 5],

    /// Delay between network checks
    #[serde(default = "default_connectivity_poll_ms")]
    pub connectivity_poll_ms: u64,

    /// Tool name reported with new time entries
    #[serde(default = "default_created_with")]
    pub created_with: String,
}

fn default_connectivity_poll_ms() -> u64 {
    DEFAULT_CONNECTIVITY_POLL_MS
}

fn default_created_with() -> String {
    DEFAULT_CREATED_WITH.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detector: DetectorParameters::default(),
            project_ids: [0; 5],
            connectivity_poll_ms: default_connectivity_poll_ms(),
            created_with: default_created_with(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.detector
            .validate()
            .context("Invalid detector configuration")?;
        if self.connectivity_poll_ms == 0 {
            anyhow::bail!("connectivity_poll_ms must be positive");
        }
        Ok(())
    }

    /// Action table for the configured projects
    pub fn table(&self) -> OrientationTable<TimeTrackingAction> {
        OrientationTable::time_tracking(self.project_ids)
    }

    /// Handler reporting `created_with` on every started entry
    pub fn time_tracking_handler<T: TimeTrackingApi>(&self, api: T) -> TimeTrackingHandler<T> {
        TimeTrackingHandler::new(api).with_created_with(self.created_with.clone())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            connectivity_poll_ms: self.connectivity_poll_ms,
        }
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }
}
