//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_error() {
        let err = ConfigError::InvalidFormat("array of tables".to_string());
        assert!(err.to_string().contains("array of tables"));
        assert!(err.to_string().contains("Invalid"));
    }

    #[test]
    fn test_env_var_not_set_error() {
        let err = ConfigError::EnvVarNotSet("METRICS_HOST".to_string());
        assert!(err.to_string().contains("METRICS_HOST"));
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_error_debug() {
        let err = ConfigError::EnvVarNotSet("VAR".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("EnvVarNotSet"));
    }
}
