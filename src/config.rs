//! Configuration management for Floodgate.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ratelimit::PresetConfig;

/// Main configuration for an embedding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodgateConfig {
    /// Background sweeper configuration
    #[serde(default)]
    pub sweeper: SweeperConfig,

    /// Path to a named preset configuration file
    pub presets_path: Option<String>,
}

impl Default for FloodgateConfig {
    fn default() -> Self {
        Self {
            sweeper: SweeperConfig::default(),
            presets_path: None,
        }
    }
}

/// Background sweeper configuration.
///
/// Both values are deliberately coarse and independent of any key's
/// configured window: the sweeper reclaims memory for idle keys, it is not
/// part of the admission decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// How often the sweeper runs, in seconds
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,

    /// Staleness threshold in milliseconds; timestamps older than this are
    /// reclaimed regardless of the window they were admitted under
    #[serde(default = "default_staleness_threshold")]
    pub staleness_threshold_ms: i64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sweep_interval(),
            staleness_threshold_ms: default_staleness_threshold(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_staleness_threshold() -> i64 {
    300_000
}

impl FloodgateConfig {
    /// Load configuration from a YAML file path.
    pub fn from_file(path: &str) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: FloodgateConfig = serde_yaml::from_str(&contents)
            .map_err(|e| crate::error::FloodgateError::Config(e.to_string()))?;
        info!(path = %path, "Configuration loaded");
        Ok(config)
    }

    /// Load the preset file referenced by `presets_path`, or the built-in
    /// presets when no path is configured.
    pub fn load_presets(&self) -> crate::error::Result<PresetConfig> {
        match &self.presets_path {
            Some(path) => PresetConfig::from_file(path),
            None => Ok(PresetConfig::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FloodgateConfig::default();
        assert_eq!(config.sweeper.interval_secs, 300);
        assert_eq!(config.sweeper.staleness_threshold_ms, 300_000);
        assert!(config.presets_path.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
sweeper:
  interval_secs: 60
"#;
        let config: FloodgateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sweeper.interval_secs, 60);
        // Unset fields fall back to their defaults
        assert_eq!(config.sweeper.staleness_threshold_ms, 300_000);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
sweeper:
  interval_secs: 120
  staleness_threshold_ms: 120000
presets_path: /etc/floodgate/presets.yaml
"#;
        let config: FloodgateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sweeper.interval_secs, 120);
        assert_eq!(config.sweeper.staleness_threshold_ms, 120_000);
        assert_eq!(
            config.presets_path.as_deref(),
            Some("/etc/floodgate/presets.yaml")
        );
    }

    #[test]
    fn test_load_presets_without_path_uses_builtin() {
        let config = FloodgateConfig::default();
        let presets = config.load_presets().unwrap();
        assert!(presets.get("process_statement").is_some());
    }
}
