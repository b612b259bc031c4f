//! REST client configuration.

use serde::Deserialize;
use std::time::Duration;

/// Configuration for a [`RestChainClient`](crate::RestChainClient).
///
/// Deserializes from TOML:
///
/// ```toml
/// name = "osmosis"
/// endpoint = "http://127.0.0.1:1317"
/// request_timeout = "5s"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Chain name used in logs and errors.
    #[serde(default = "default_name")]
    pub name: String,

    /// Base URL of the REST gateway.
    pub endpoint: String,

    /// Timeout for a single request.
    #[serde(default = "default_request_timeout", with = "duration_str")]
    pub request_timeout: Duration,
}

fn default_name() -> String {
    "chain".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

impl ClientConfig {
    /// Create a configuration for `endpoint` with defaults for the rest.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            endpoint: endpoint.into(),
            request_timeout: default_request_timeout(),
        }
    }

    /// Set the chain name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Parse a configuration from TOML.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Durations written as humantime strings ("500ms", "5s").
mod duration_str {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
