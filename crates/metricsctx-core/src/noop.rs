//! The no-op backend and its process-wide accessor.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use metricsctx_protocols::{AttributeAccess, BackendError, ReportingBackend};

/// Class identifier of [`NoOpBackend`], used when `<name>.class` is unset.
pub const NOOP_BACKEND_CLASS: &str = "metricsctx.NoOpBackend";

static NOOP_CONTEXTS: Lazy<Mutex<HashMap<String, Arc<NoOpBackend>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Backend that discards all metric data and never monitors.
#[derive(Debug, Default)]
pub struct NoOpBackend {
    context_name: String,
}

impl NoOpBackend {
    /// Create a backend already bound to `context_name`.
    pub fn named(context_name: impl Into<String>) -> Self {
        Self {
            context_name: context_name.into(),
        }
    }
}

impl ReportingBackend for NoOpBackend {
    fn initialize(
        &mut self,
        context_name: &str,
        _registry: &dyn AttributeAccess,
    ) -> Result<(), BackendError> {
        self.context_name = context_name.to_string();
        Ok(())
    }

    fn context_name(&self) -> &str {
        &self.context_name
    }

    fn class_name(&self) -> &str {
        NOOP_BACKEND_CLASS
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Get the no-op backend for `context_name`.
///
/// Works without any registry: instances live in their own process-wide map,
/// one per name, and never appear in a registry's context list.
pub fn noop_backend(context_name: &str) -> Arc<NoOpBackend> {
    NOOP_CONTEXTS
        .lock()
        .entry(context_name.to_string())
        .or_insert_with(|| Arc::new(NoOpBackend::named(context_name)))
        .clone()
}
