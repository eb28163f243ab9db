//! Application configuration.
//!
//! The configuration is loaded from
//! `$XDG_CONFIG_HOME/swaytab/config.json`.  Every field is optional — a
//! minimal `{}` file is valid and all fields fall back to their compiled-in
//! defaults.  Thumbnail geometry and the capture settle delay are
//! deliberately *not* configurable; they live as constants in
//! [`capture`](crate::capture).
//!
//! # Example
//!
//! ```json
//! {
//!   "menu": ["wofi", "--dmenu"],
//!   "notify_timeout_ms": 2000
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Menu program used by `--list`, argv style.  Must print the selected
    /// line index on stdout (rofi's `-format i`).
    pub menu: Vec<String>,

    /// Notification display time in milliseconds.
    pub notify_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu: ["rofi", "-dmenu", "-i", "-p", "Windows", "-format", "i", "-no-custom"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            notify_timeout_ms: 1400,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "menu": ["wofi", "--dmenu"],
            "notify_timeout_ms": 2000
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.menu, vec!["wofi".to_string(), "--dmenu".to_string()]);
        assert_eq!(cfg.notify_timeout_ms, 2000);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        let defaults = Config::default();
        assert_eq!(cfg.menu, defaults.menu);
        assert_eq!(cfg.notify_timeout_ms, defaults.notify_timeout_ms);
    }

    #[test]
    fn deserialize_partial_keeps_other_defaults() {
        let json = r#"{ "notify_timeout_ms": 500 }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.notify_timeout_ms, 500);
        assert_eq!(cfg.menu, Config::default().menu);
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "menu": ["dmenu"], "future_section": { "key": 42 } }"#;
        // Should not fail — unknown keys are silently ignored.
        let _cfg: Config = serde_json::from_str(json).unwrap();
    }

    #[test]
    fn default_menu_is_rofi_dmenu() {
        let cfg = Config::default();
        assert_eq!(cfg.menu.first().map(String::as_str), Some("rofi"));
        assert!(cfg.menu.iter().any(|a| a == "-dmenu"));
    }
}
