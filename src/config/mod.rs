//! Application configuration.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CatalogConfig, Config, HomeConfig, LoggingConfig};
