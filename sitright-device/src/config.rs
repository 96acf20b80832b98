//! Device configuration
//!
//! Transport credentials and deployment knobs live in a TOML file; the
//! scoring tuning itself is compile-time constant in `sitright-core`. The
//! posture profile can be overridden for a different sensor mount, but is
//! still fixed for the life of the process.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitright_core::{constants::scoring::TICK_INTERVAL_MS, PostureProfile};

/// Which IMU implementation the daemon runs against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImuKind {
    /// Built-in posture wave generator
    Synthetic,
    /// Replay of a recorded CSV capture
    Replay {
        /// Path to the capture file
        path: PathBuf,
    },
}

/// Daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Bot credential token
    pub bot_token: String,
    /// Chat id receiving lifecycle and warning pushes
    pub chat_id: String,
    /// Bot API base override, mainly for staging/tests
    pub api_base: Option<String>,
    /// Evaluation cadence; shrink it to fast-forward replays
    pub tick_interval_ms: u64,
    /// IMU source selection
    pub imu: ImuKind,
    /// Posture profile override for non-standard mounts
    pub posture: Option<PostureProfile>,
    /// Start a monitoring session immediately at boot
    pub auto_start: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: None,
            tick_interval_ms: TICK_INTERVAL_MS,
            imu: ImuKind::Synthetic,
            posture: None,
            auto_start: false,
        }
    }
}

impl DeviceConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Write configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("serializing config")?;
        fs::write(path, content).with_context(|| format!("writing config {}", path.display()))
    }

    /// The profile the classifier should run with
    pub fn profile(&self) -> PostureProfile {
        self.posture.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitright.toml");

        let mut config = DeviceConfig::default();
        config.bot_token = "123:abc".into();
        config.chat_id = "42".into();
        config.imu = ImuKind::Replay {
            path: "capture.csv".into(),
        };
        config.save(&path).unwrap();

        let loaded = DeviceConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitright.toml");
        fs::write(&path, "bot_token = \"t\"\nchat_id = \"c\"\n").unwrap();

        let config = DeviceConfig::load(&path).unwrap();
        assert_eq!(config.tick_interval_ms, TICK_INTERVAL_MS);
        assert_eq!(config.imu, ImuKind::Synthetic);
        assert!(config.posture.is_none());
        assert!(!config.auto_start);
    }
}
