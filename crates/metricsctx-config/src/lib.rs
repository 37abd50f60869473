//! # metricsctx Config
//!
//! Configuration sources feeding the context registry's attributes.

mod error;
mod loader;
mod source;

pub use error::ConfigError;
pub use loader::{FileConfigSource, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
pub use source::{ConfigSource, MapConfigSource, DEFAULT_KEY_PREFIX};
