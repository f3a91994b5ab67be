//! Collector configuration
//!
//! Resolution order: built-in defaults, then a TOML file, then CLI flags.
//! The file is taken from `--config`, else `GALAXY_COLLECTOR_CONFIG`, else
//! `galaxy-collector.toml` in the working directory when it exists.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const CONFIG_ENV_VAR: &str = "GALAXY_COLLECTOR_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "galaxy-collector.toml";
pub const DEFAULT_OUTPUT: &str = "galaxy.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Snapshot destination, overwritten on every successful run
    pub output: PathBuf,
    /// Per-fetch deadline. Unset means transport defaults (no deadline).
    pub timeout_secs: Option<u64>,
    /// Upper bound on concurrent fetches. Unset means one task per node.
    pub max_in_flight: Option<usize>,
    pub user_agent: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            timeout_secs: None,
            max_in_flight: None,
            user_agent: format!("galaxy-collector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CollectorConfig {
    /// Load config from an explicit path, the env var, or the default file
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var(CONFIG_ENV_VAR) {
                Ok(path) if !path.trim().is_empty() => (PathBuf::from(path), true),
                _ => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if !required && !path.exists() {
            debug!("No {} found, using default config", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        let config = Self::from_toml(&content)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        config.validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content)
    }

    /// Reject settings that would stall the run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".into()));
        }
        if self.max_in_flight == Some(0) {
            return Err(ConfigError::Invalid("max_in_flight must be greater than 0".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output path is empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert_eq!(config.output, PathBuf::from("galaxy.json"));
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_in_flight, None);
        assert!(config.user_agent.starts_with("galaxy-collector/"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CollectorConfig::from_toml("timeout_secs = 5\n").unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.output, PathBuf::from("galaxy.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CollectorConfig::from_toml("  \n").unwrap(), CollectorConfig::default());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let config = CollectorConfig { max_in_flight: Some(0), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = CollectorConfig { timeout_secs: Some(0), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collector.toml");
        std::fs::write(&path, "output = \"out/survey.json\"\nmax_in_flight = 4\n").unwrap();

        let config = CollectorConfig::load(Some(&path)).await.unwrap();
        assert_eq!(config.output, PathBuf::from("out/survey.json"));
        assert_eq!(config.max_in_flight, Some(4));
    }

    #[tokio::test]
    async fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = CollectorConfig::load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
