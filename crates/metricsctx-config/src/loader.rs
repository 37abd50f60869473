//! TOML file configuration source.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::source::{ConfigSource, DEFAULT_KEY_PREFIX};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "METRICSCTX_CONFIG";

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "metrics.toml";

/// Reads metrics configuration from a TOML file.
///
/// Nested tables are flattened into dotted keys, so
///
/// ```toml
/// [metrics.dfs]
/// class = "acme.FileContext"
/// ```
///
/// yields `metrics.dfs.class = "acme.FileContext"`.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
    prefix: String,
}

impl FileConfigSource {
    /// Create a source reading `path`. `~` is expanded.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self {
            path: PathBuf::from(Self::expand_path(&raw)),
            prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Create a source from `$METRICSCTX_CONFIG`, falling back to `metrics.toml`.
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(DEFAULT_CONFIG_FILE),
        }
    }

    /// Use a custom key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse configuration content into flattened key/value pairs.
    pub fn parse_str(content: &str) -> Result<BTreeMap<String, String>, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let table: toml::Table = expanded.parse()?;
        let mut entries = BTreeMap::new();
        flatten_table("", &table, &mut entries)?;
        Ok(entries)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

impl ConfigSource for FileConfigSource {
    fn key_prefix(&self) -> &str {
        &self.prefix
    }

    fn load(&self) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No metrics config at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse_str(&content).map(Some)
    }
}

fn flatten_table(
    prefix: &str,
    table: &toml::Table,
    out: &mut BTreeMap<String, String>,
) -> Result<(), ConfigError> {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&full_key, nested, out)?,
            other => {
                let rendered = render_scalar(&full_key, other)?;
                out.insert(full_key, rendered);
            }
        }
    }
    Ok(())
}

fn render_scalar(key: &str, value: &toml::Value) -> Result<String, ConfigError> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(d) => Ok(d.to_string()),
        toml::Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    toml::Value::Array(_) | toml::Value::Table(_) => Err(ConfigError::InvalidFormat(
                        format!("{} must hold scalar values only", key),
                    )),
                    scalar => render_scalar(key, scalar),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(","))
        }
        toml::Value::Table(_) => Err(ConfigError::InvalidFormat(format!(
            "{} is a table, expected a value",
            key
        ))),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
