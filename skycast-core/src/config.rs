use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the API key stored in the config file.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

fn default_language() -> String {
    "en".to_string()
}

fn default_suggestion_limit() -> u8 {
    5
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key. `SKYCAST_API_KEY` takes precedence when set.
    pub api_key: Option<String>,

    /// Language code passed to the weather endpoint, e.g. "en" or "es".
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of autocomplete candidates requested per lookup.
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: default_language(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl Config {
    /// API key to use: the environment variable when set and non-blank,
    /// otherwise the key from the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_key: Option<String>) -> Option<String> {
        env_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_takes_precedence_over_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".to_string()),
            ..Config::default()
        };

        let key = cfg.api_key_with_env(Some("ENV_KEY".to_string()));
        assert_eq!(key.as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_env_key_falls_back_to_file_key() {
        let cfg = Config {
            api_key: Some("FILE_KEY".to_string()),
            ..Config::default()
        };

        let key = cfg.api_key_with_env(Some("   ".to_string()));
        assert_eq!(key.as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn no_key_anywhere_resolves_to_none() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key_with_env(None), None);
    }

    #[test]
    fn defaults_fill_in_missing_fields() {
        let cfg: Config = toml::from_str("api_key = \"KEY\"").expect("minimal config must parse");

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.suggestion_limit, 5);
    }
}
