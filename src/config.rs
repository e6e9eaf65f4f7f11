use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Tab size (number of spaces)
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Open the archive read-only by default
    #[serde(default)]
    pub read_only: bool,

    /// Log file path (if not specified, the data directory is used)
    #[serde(default)]
    pub log_file_path: Option<String>,

    /// Minimum log level (default: "info")
    /// Possible values: "debug", "info", "warn", "error"
    #[serde(default = "default_min_log_level")]
    pub min_log_level: String,
}

fn default_theme_name() -> String {
    "default".to_string()
}

fn default_tab_size() -> usize {
    4
}

fn default_min_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            tab_size: default_tab_size(),
            read_only: false,
            log_file_path: None,
            min_log_level: default_min_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    /// On first run, creates config file with default values
    /// Auto-completes missing keys with default values
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let original_content = std::fs::read_to_string(&config_path)?;

            // Missing fields fall back to serde defaults
            let config: Self = toml::from_str(&original_content)?;

            // Serialize back to TOML to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            let mut original_hasher = DefaultHasher::new();
            original_content.hash(&mut original_hasher);
            let original_hash = original_hasher.finish();

            let mut normalized_hasher = DefaultHasher::new();
            normalized_content.hash(&mut normalized_hasher);
            let normalized_hash = normalized_hasher.finish();

            // If hashes differ, the config was auto-completed with default
            // values; persist the completed version
            if original_hash != normalized_hash {
                config.save()?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get path to config file
    fn get_config_path() -> Result<PathBuf> {
        let config_dir = crate::xdg_dirs::get_config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get path to log file
    /// If specified in config, use it; otherwise use the data directory
    pub fn get_log_file_path(&self) -> PathBuf {
        if let Some(ref path) = self.log_file_path {
            PathBuf::from(path)
        } else {
            crate::xdg_dirs::get_data_dir()
                .map(|dir| dir.join("confedit.log"))
                .unwrap_or_else(|_| std::env::temp_dir().join("confedit.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.tab_size, 4);
        assert!(!config.read_only);
        assert_eq!(config.min_log_level, "info");
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.tab_size, 4);
        assert_eq!(config.min_log_level, "info");
    }

    #[test]
    fn test_roundtrip() {
        let config = Config {
            theme: "light".to_string(),
            tab_size: 2,
            read_only: true,
            log_file_path: Some("/tmp/confedit-test.log".to_string()),
            min_log_level: "debug".to_string(),
        };
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.theme, config.theme);
        assert_eq!(parsed.tab_size, config.tab_size);
        assert_eq!(parsed.read_only, config.read_only);
        assert_eq!(parsed.log_file_path, config.log_file_path);
    }
}
