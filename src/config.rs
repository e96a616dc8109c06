use crate::core::{DEFAULT_BUCKET_COUNT, DEFAULT_MAX_EDIT_DISTANCE};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub index: IndexSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct IndexSettings {
    /// Buckets per hash index; fixed for the lifetime of the index
    #[validate(range(min = 1))]
    pub bucket_count: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct MatchingSettings {
    #[validate(range(min = 1))]
    pub max_edit_distance: usize,
    pub top_priorities: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            top_priorities: default_top_priorities(),
        }
    }
}

fn default_top_priorities() -> usize { 10 }

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RECORD_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RECORD_MATCH__INDEX__BUCKET_COUNT -> index.bucket_count
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Self>()?.validated()
    }

    /// Parse settings from TOML text without consulting the environment
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(text).map_err(|e| ConfigError::Message(e.to_string()))?;
        settings.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.index
            .validate()
            .map_err(|e| ConfigError::Message(format!("index: {}", e)))?;
        self.matching
            .validate()
            .map_err(|e| ConfigError::Message(format!("matching: {}", e)))?;
        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("RECORD_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.index.bucket_count, 997);
        assert_eq!(settings.matching.max_edit_distance, 2);
        assert_eq!(settings.matching.top_priorities, 10);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml_str("[index]\nbucket_count = 101\n").unwrap();
        assert_eq!(settings.index.bucket_count, 101);
        assert_eq!(settings.matching.max_edit_distance, 2);
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_zero_buckets_fail_validation() {
        let result = Settings::from_toml_str("[index]\nbucket_count = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("record-match-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[index]\nbucket_count = 101\n[matching]\ntop_priorities = 3\n")
            .unwrap();

        let from_file = Settings::load_from(&path).unwrap();
        assert_eq!(from_file.index.bucket_count, 101);
        assert_eq!(from_file.matching.top_priorities, 3);

        std::env::set_var("RECORD_MATCH__INDEX__BUCKET_COUNT", "211");
        let overridden = Settings::load_from(&path);
        std::env::remove_var("RECORD_MATCH__INDEX__BUCKET_COUNT");
        std::fs::remove_file(&path).unwrap();

        let overridden = overridden.unwrap();
        assert_eq!(overridden.index.bucket_count, 211);
        assert_eq!(overridden.matching.top_priorities, 3);
    }
}
