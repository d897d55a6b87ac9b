//! Named rate limit presets.
//!
//! This module handles loading named rate limit configurations from files.
//! The limiter itself imposes nothing on preset values; presets exist so an
//! embedding application can declare its per-endpoint budgets in one place
//! and look them up by name at each call site.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::limiter::RateLimitConfig;
use crate::error::{FloodgateError, Result};

/// A collection of named rate limit configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Map of preset name to rate limit configuration
    #[serde(default)]
    pub presets: HashMap<String, RateLimitConfig>,
}

impl PresetConfig {
    /// Create an empty preset collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in presets covering a statement-processing API: a costly
    /// upload/processing endpoint, a read/update endpoint, and a delete
    /// endpoint, each counted per minute.
    pub fn builtin() -> Self {
        let mut presets = HashMap::new();
        presets.insert(
            "process_statement".to_string(),
            RateLimitConfig {
                max_requests: 5,
                window_ms: 60_000,
            },
        );
        presets.insert(
            "transactions".to_string(),
            RateLimitConfig {
                max_requests: 30,
                window_ms: 60_000,
            },
        );
        presets.insert(
            "delete_statement".to_string(),
            RateLimitConfig {
                max_requests: 10,
                window_ms: 60_000,
            },
        );
        Self { presets }
    }

    /// Load presets from a YAML or JSON file, chosen by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading rate limit presets");

        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Load presets from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| FloodgateError::Config(format!("Failed to parse presets: {}", e)))
    }

    /// Load presets from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| FloodgateError::Config(format!("Failed to parse presets: {}", e)))
    }

    /// Look up a preset by name.
    pub fn get(&self, name: &str) -> Option<&RateLimitConfig> {
        self.presets.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets() {
        let presets = PresetConfig::builtin();

        let process = presets.get("process_statement").unwrap();
        assert_eq!(process.max_requests, 5);
        assert_eq!(process.window_ms, 60_000);

        let transactions = presets.get("transactions").unwrap();
        assert_eq!(transactions.max_requests, 30);

        let delete = presets.get("delete_statement").unwrap();
        assert_eq!(delete.max_requests, 10);
    }

    #[test]
    fn test_parse_yaml_presets() {
        let yaml = r#"
presets:
  upload:
    max_requests: 5
    window_ms: 60000
  search:
    max_requests: 100
    window_ms: 1000
"#;
        let presets = PresetConfig::from_yaml(yaml).unwrap();

        let upload = presets.get("upload").unwrap();
        assert_eq!(upload.max_requests, 5);
        assert_eq!(upload.window_ms, 60_000);

        let search = presets.get("search").unwrap();
        assert_eq!(search.max_requests, 100);
        assert_eq!(search.window_ms, 1_000);
    }

    #[test]
    fn test_parse_json_presets() {
        let json = r#"
{
  "presets": {
    "upload": { "max_requests": 5, "window_ms": 60000 }
  }
}
"#;
        let presets = PresetConfig::from_json(json).unwrap();
        let upload = presets.get("upload").unwrap();
        assert_eq!(upload.max_requests, 5);
    }

    #[test]
    fn test_parse_invalid_yaml_fails() {
        let result = PresetConfig::from_yaml("presets: [not, a, map]");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_preset_is_none() {
        let presets = PresetConfig::builtin();
        assert!(presets.get("no_such_preset").is_none());
    }

    #[test]
    fn test_empty_document_has_no_presets() {
        let presets = PresetConfig::from_yaml("{}").unwrap();
        assert!(presets.presets.is_empty());
    }
}
