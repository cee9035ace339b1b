//! Configuration management for forklone
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (FORKLONE_*)
//! 3. Config file (~/.config/forklone/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fork readiness polling configuration
///
/// Newly created forks are not immediately queryable for branch data, so
/// readiness is polled. The deadline bounds the wait; `None` polls until
/// the fork is ready or the hosting service returns a fatal error.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForkConfig {
    /// Delay between readiness probes
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Overall deadline for fork readiness
    #[serde(with = "humantime_serde")]
    pub poll_deadline: Option<Duration>,
}

impl Default for ForkConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            poll_deadline: Some(Duration::from_secs(300)),
        }
    }
}

/// Clone and remote-setup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloneConfig {
    /// Name for the remote pointing at the parent repository
    pub upstream_remote: String,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            upstream_remote: "upstream".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Fork polling configuration
    pub fork: ForkConfig,

    /// Clone configuration
    pub clone: CloneConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/forklone/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("forklone").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - FORKLONE_UPSTREAM_REMOTE: Name for the upstream remote
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(name) = std::env::var("FORKLONE_UPSTREAM_REMOTE") {
            if !name.is_empty() {
                self.clone.upstream_remote = name;
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, upstream_remote: Option<String>) -> Self {
        if let Some(name) = upstream_remote {
            self.clone.upstream_remote = name;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(upstream_remote: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(upstream_remote))
    }
}
