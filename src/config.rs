use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_server_url() -> String {
    "http://localhost:4000".to_string()
}

/// Where the config file lives: `<config dir>/carnet/config.json`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("carnet")
        .join("config.json")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CarnetConfig {
    /// Base URL of the notes backend.
    pub server_url: String,
    /// Start in dark mode. The in-app toggle is session-only.
    pub dark_mode: bool,
    pub debug_logging: bool,
}

impl Default for CarnetConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            dark_mode: true,
            debug_logging: false,
        }
    }
}

impl CarnetConfig {
    /// Load the config file, writing the defaults on first run.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                let config = Self::default();
                if let Err(e) = config.save() {
                    log::warn!("Failed to write default config: {}", e);
                }
                config
            }
        }
    }

    /// Write the config as pretty JSON, creating the directory if needed.
    pub fn save(&self) -> std::io::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CarnetConfig::default();
        assert_eq!(config.server_url, "http://localhost:4000");
        assert!(config.dark_mode);
        assert!(!config.debug_logging);
    }

    #[test]
    fn json_round_trip() {
        let config = CarnetConfig {
            server_url: "http://10.0.0.5:3999".to_string(),
            dark_mode: false,
            debug_logging: true,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: CarnetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
