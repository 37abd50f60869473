//! Backend resolution and construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend class not resolvable: {0}")]
    ClassNotResolvable(String),

    #[error("Backend class {class} not instantiable: {reason}")]
    NotInstantiable { class: String, reason: String },

    #[error("Access denied to backend class {class}: {reason}")]
    AccessDenied { class: String, reason: String },

    #[error("Attribute {attribute} does not hold a class name string")]
    InvalidClassAttribute { attribute: String },

    #[error("Context {context} initialization failed: {reason}")]
    InitializationFailed { context: String, reason: String },

    #[error("Backend class already registered: {0}")]
    AlreadyRegistered(String),
}

impl BackendError {
    /// Create a not-instantiable error.
    pub fn not_instantiable(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotInstantiable {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Create an access-denied error.
    pub fn access_denied(class: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AccessDenied {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Create an initialization-failed error.
    pub fn initialization_failed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InitializationFailed {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
