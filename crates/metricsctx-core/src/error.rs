//! Registry errors.

use thiserror::Error;

use metricsctx_config::ConfigError;
use metricsctx_protocols::BackendError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Metrics configuration unavailable: {0}")]
    ConfigurationUnavailable(#[from] ConfigError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
