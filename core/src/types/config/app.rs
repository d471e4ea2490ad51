use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// User-facing configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub records: RecordsConfig,
    #[serde(default)]
    pub user: UserConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> std::path::PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.api.base_url.trim().is_empty() {
            errors.push("api.base_url must not be empty".to_string());
        }

        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be at least 1".to_string());
        }

        if self.health.poll_interval_secs == 0 {
            errors.push("health.poll_interval_secs must be at least 1".to_string());
        }

        if self.records.max_samples_per_record == 0 {
            errors.push("records.max_samples_per_record must be at least 1".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            api: ApiConfig {
                base_url: if self.api.base_url.trim().is_empty() {
                    defaults.api.base_url
                } else {
                    self.api.base_url.clone()
                },
                timeout_secs: if self.api.timeout_secs == 0 {
                    defaults.api.timeout_secs
                } else {
                    self.api.timeout_secs
                },
            },
            health: HealthConfig {
                poll_interval_secs: if self.health.poll_interval_secs == 0 {
                    defaults.health.poll_interval_secs
                } else {
                    self.health.poll_interval_secs
                },
            },
            records: RecordsConfig {
                max_samples_per_record: if self.records.max_samples_per_record == 0 {
                    defaults.records.max_samples_per_record
                } else {
                    self.records.max_samples_per_record
                },
            },
            user: self.user.clone(),
        }
    }
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Health-check polling settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl HealthConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

/// Record entry settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordsConfig {
    #[serde(default = "default_max_samples_per_record")]
    pub max_samples_per_record: usize,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            max_samples_per_record: default_max_samples_per_record(),
        }
    }
}

fn default_max_samples_per_record() -> usize {
    3
}

/// Identity of the person operating this client. Used as the default
/// `checked_out_by` for sample checkouts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests;
