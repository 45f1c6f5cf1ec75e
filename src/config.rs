// Configuration loading.
// Merges the TOML config file, environment, and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::paths;
use crate::cli::Cli;
use crate::error::{JobdeckError, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/graphql";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the GraphQL endpoint.
pub const ENDPOINT_ENV: &str = "DAGIT_URL";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Seconds between automatic refreshes.
    pub refresh_interval_secs: u64,
    /// Seconds before a single request gives up.
    pub request_timeout_secs: u64,
    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Resolve the config file path: `--config` (or its env var), then platform default.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => paths::config_path(),
        }
    }

    /// Load a config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw).map_err(|source| JobdeckError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the resolved path and apply env and CLI overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = match Self::resolve_path(cli.config.as_deref()) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(interval) = cli.interval {
            self.refresh_interval_secs = interval;
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(JobdeckError::InvalidConfig(
                "endpoint must not be empty".to_string(),
            ));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(JobdeckError::InvalidConfig(format!(
                "endpoint {} must be an http(s) URL",
                self.endpoint
            )));
        }
        if self.refresh_interval_secs == 0 {
            return Err(JobdeckError::InvalidConfig(
                "refresh_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(JobdeckError::InvalidConfig(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(JobdeckError::InvalidConfig(format!(
                "log_level {} is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
