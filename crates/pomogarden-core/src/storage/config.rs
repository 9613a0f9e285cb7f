//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Work and break durations
//! - Garden profile (staged plots or flat count) and its shape
//! - Storage key override for the persisted garden
//! - Default log level
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::garden::GrowthPolicy;
use crate::timer::SessionDurations;

const CONFIG_FILE: &str = "config.toml";

/// Session lengths in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_break_secs")]
    pub break_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenProfile {
    Staged,
    Flat,
}

/// Garden shape and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenConfig {
    #[serde(default = "default_profile")]
    pub profile: GardenProfile,
    /// Number of plots (staged only).
    #[serde(default = "default_garden_size")]
    pub size: usize,
    /// Highest stage a plot reaches (staged only).
    #[serde(default = "default_max_stage")]
    pub max_stage: u32,
    /// Overrides the profile's default key in the kv store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `POMOGARDEN_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub garden: GardenConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// Default functions
fn default_work_secs() -> u64 {
    25 * 60
}
fn default_break_secs() -> u64 {
    5 * 60
}
fn default_profile() -> GardenProfile {
    GardenProfile::Staged
}
fn default_garden_size() -> usize {
    6
}
fn default_max_stage() -> u32 {
    3
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            break_secs: default_break_secs(),
        }
    }
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            size: default_garden_size(),
            max_stage: default_max_stage(),
            storage_key: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::preset(GardenProfile::Staged)
    }
}

impl Config {
    /// Default settings with the given garden profile. Both profiles share the
    /// 25 / 5 minute timer; only the growth policy and storage key differ.
    pub fn preset(profile: GardenProfile) -> Self {
        Self {
            timer: TimerConfig::default(),
            garden: GardenConfig {
                profile,
                ..GardenConfig::default()
            },
            log: LogConfig::default(),
        }
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                // Optional keys are absent from the JSON form until set.
                let existing = match obj.get(part) {
                    Some(v) => v.clone(),
                    None if key == "garden.storage_key" => serde_json::Value::Null,
                    None => return Err(ConfigError::UnknownKey(key.to_string())),
                };

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from the data directory, writing the default file when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default file when missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check cross-field constraints serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.garden.profile == GardenProfile::Staged {
            if self.garden.size == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "garden.size".into(),
                    message: "a staged garden needs at least one plot".into(),
                });
            }
            if self.garden.max_stage == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "garden.max_stage".into(),
                    message: "plots need at least one growth stage".into(),
                });
            }
        }
        if let Some(key) = &self.garden.storage_key {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "garden.storage_key".into(),
                    message: "storage key must not be blank".into(),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is unchanged on error.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn durations(&self) -> SessionDurations {
        SessionDurations::new(self.timer.work_secs, self.timer.break_secs)
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        match self.garden.profile {
            GardenProfile::Staged => GrowthPolicy::Staged {
                garden_size: self.garden.size,
                max_stage: self.garden.max_stage,
            },
            GardenProfile::Flat => GrowthPolicy::Flat,
        }
    }

    /// Key the garden lives under in the kv store.
    pub fn storage_key(&self) -> String {
        self.garden
            .storage_key
            .clone()
            .unwrap_or_else(|| self.growth_policy().default_storage_key().to_string())
    }
}
