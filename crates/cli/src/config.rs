//! File-backed settings.

use blockpoll_chain::ClientConfig;
use blockpoll_poller::PollConfig;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No chain endpoint given (use --endpoint or [chain] endpoint)")]
    MissingEndpoint,
}

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Chain to query. Optional here because `--endpoint` can supply it.
    #[serde(default)]
    pub chain: Option<ClientConfig>,

    #[serde(default)]
    pub poll: PollSettings,
}

/// `[poll]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollSettings {
    #[serde(default, deserialize_with = "optional_duration")]
    pub interval: Option<Duration>,

    #[serde(default, deserialize_with = "optional_duration")]
    pub deadline: Option<Duration>,

    #[serde(default)]
    pub max_height_errors: Option<u32>,
}

impl PollSettings {
    /// Poll configuration with unset fields left at their defaults.
    pub fn to_poll_config(&self) -> PollConfig {
        let mut config = PollConfig::default();
        if let Some(interval) = self.interval {
            config = config.with_poll_interval(interval);
        }
        if let Some(deadline) = self.deadline {
            config = config.with_deadline(deadline);
        }
        if let Some(limit) = self.max_height_errors {
            config = config.with_max_height_errors(limit);
        }
        config
    }
}

impl CliConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.chain = Some(match self.chain.take() {
                Some(chain) => ClientConfig { endpoint, ..chain },
                None => ClientConfig::new(endpoint),
            });
        }
        if interval.is_some() {
            self.poll.interval = interval;
        }
        if timeout.is_some() {
            self.poll.deadline = timeout;
        }
        self
    }

    /// The chain to query.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        self.chain.clone().ok_or(ConfigError::MissingEndpoint)
    }
}

fn optional_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error> {
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s)
        .map(Some)
        .map_err(serde::de::Error::custom)
}
