//! Configuration source abstraction.

use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Prefix carried by every metrics configuration key.
pub const DEFAULT_KEY_PREFIX: &str = "metrics.";

/// Supplies prefixed key/value pairs at registry construction.
pub trait ConfigSource: Send + Sync {
    /// Prefix stripped from each key before it becomes an attribute.
    fn key_prefix(&self) -> &str {
        DEFAULT_KEY_PREFIX
    }

    /// Load all configuration entries.
    ///
    /// `Ok(None)` means no configuration exists, which is not an error.
    fn load(&self) -> Result<Option<BTreeMap<String, String>>, ConfigError>;
}

/// In-memory configuration source.
#[derive(Debug, Clone, Default)]
pub struct MapConfigSource {
    prefix: Option<String>,
    entries: Option<BTreeMap<String, String>>,
}

impl MapConfigSource {
    /// Create a source with no configuration at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a source from prefixed key/value pairs.
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: None,
            entries: Some(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Use a custom key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl ConfigSource for MapConfigSource {
    fn key_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_KEY_PREFIX)
    }

    fn load(&self) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
        Ok(self.entries.clone())
    }
}
