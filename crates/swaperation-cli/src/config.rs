//! Configuration for the Swaperation CLI.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`--config FILE`, or `swaperation.yaml` in the working
//!    directory)
//! 2. Environment variables (with SWAPERATION_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "swaperation.yaml";

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched by `levels`
    #[serde(default = "default_levels_dir")]
    pub levels_dir: PathBuf,

    /// Directory for `play --output` files and the default for `verify`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level used when no `-v` flag is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Absolute and relative tolerance of the equivalence check
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_levels_dir() -> PathBuf {
    PathBuf::from("levels")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_tolerance() -> f64 {
    1e-5
}

impl Default for Config {
    fn default() -> Self {
        Config {
            levels_dir: default_levels_dir(),
            output_dir: default_output_dir(),
            log_level: default_log_level(),
            tolerance: default_tolerance(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from `config_file`, or `swaperation.yaml` if it exists
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Config::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge process environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge variables from `lookup` into this configuration.
    ///
    /// Only variables that are set override the file-loaded (or default)
    /// values; unparsable numbers are ignored.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("SWAPERATION_LEVELS_DIR") {
            self.levels_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SWAPERATION_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("SWAPERATION_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("SWAPERATION_TOLERANCE") {
            if let Ok(val) = v.parse() {
                self.tolerance = val;
            }
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.levels_dir, PathBuf::from("levels"));
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml_ng::from_str("output_dir: runs\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("runs"));
        assert_eq!(config.tolerance, 1e-5);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().merge_vars(|key| match key {
            "SWAPERATION_LOG_LEVEL" => Some("debug".into()),
            "SWAPERATION_TOLERANCE" => Some("1e-8".into()),
            "SWAPERATION_LEVELS_DIR" => Some("/tmp/levels".into()),
            _ => None,
        });
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tolerance, 1e-8);
        assert_eq!(config.levels_dir, PathBuf::from("/tmp/levels"));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_unparsable_tolerance_ignored() {
        let config = Config::default()
            .merge_vars(|key| (key == "SWAPERATION_TOLERANCE").then(|| "tiny".to_string()));
        assert_eq!(config.tolerance, 1e-5);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tolerance() {
        let mut config = Config::default();
        config.tolerance = 0.0;
        assert!(config.validate().is_err());
        config.tolerance = f64::NAN;
        assert!(config.validate().is_err());
    }
}
