use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub home: HomeConfig,
}

/// Log output settings. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (e.g. "info", "moviedeck=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Prefix log lines with RFC 3339 timestamps (default: true).
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

/// Where movie data comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON fixture served by the use cases.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Artificial delay per use-case call in milliseconds (default: 0).
    #[serde(default)]
    pub latency_ms: u64,
}

/// Home screen behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeConfig {
    /// Fetch the first page of both lists when the screen opens (default: true).
    #[serde(default = "default_prefetch")]
    pub prefetch: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timestamps() -> bool {
    true
}

fn default_prefetch() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_timestamps(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            prefetch: default_prefetch(),
        }
    }
}
