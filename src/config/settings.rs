//! Application settings

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Core API server address
    pub server_address: String,

    /// Cluster name sent with every request
    pub cluster_name: String,

    /// Seconds between resource refreshes
    pub poll_interval: u64,

    /// Maximum events to keep in memory
    pub max_events: usize,

    /// Log level
    pub log_level: String,

    /// Theme name
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: "http://127.0.0.1:9001".to_string(),
            cluster_name: "Default".to_string(),
            poll_interval: 10,
            max_events: 500,
            log_level: "info".to_string(),
            theme: "default".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from file or create default
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Self = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        ProjectDirs::from("dev", "gitops-tui", "gitops-tui")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".gitops-tui"))
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get default log file path
    pub fn default_log_path() -> PathBuf {
        Self::config_dir().join("gitops-tui.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server_address, settings.server_address);
        assert_eq!(parsed.poll_interval, settings.poll_interval);
    }
}
