//! Configuration for the `blockpoll` command-line tool.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags:
//!
//! ```toml
//! [chain]
//! name = "osmosis"
//! endpoint = "http://127.0.0.1:1317"
//! request_timeout = "5s"
//!
//! [poll]
//! interval = "250ms"
//! deadline = "2m"
//! max_height_errors = 20
//! ```

pub mod config;

pub use config::{CliConfig, ConfigError, PollSettings};
