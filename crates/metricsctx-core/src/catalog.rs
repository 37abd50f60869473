//! Backend catalog mapping class identifiers to factories.

use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use metricsctx_protocols::{BackendError, BackendFactory, ClassResolver, ReportingBackend};

use crate::noop::{NoOpBackend, NOOP_BACKEND_CLASS};

static GLOBAL_CATALOG: Lazy<Arc<BackendCatalog>> =
    Lazy::new(|| Arc::new(BackendCatalog::with_builtins()));

/// Registry of backend factories keyed by class identifier.
///
/// Plays the part of class loading: plugins register their factories at
/// startup and registries look them up when a `<name>.class` attribute
/// names them.
pub struct BackendCatalog {
    factories: DashMap<String, Arc<dyn BackendFactory>>,
    denied: DashMap<String, String>,
}

impl BackendCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
            denied: DashMap::new(),
        }
    }

    /// Create a catalog with [`NoOpBackend`] registered.
    pub fn with_builtins() -> Self {
        let catalog = Self::new();
        let noop: Arc<dyn BackendFactory> = Arc::new(DefaultFactory::<NoOpBackend>::new(NOOP_BACKEND_CLASS));
        catalog.factories.insert(NOOP_BACKEND_CLASS.to_string(), noop);
        catalog
    }

    /// The process-wide catalog used by [`global`](crate::global).
    pub fn global() -> Arc<BackendCatalog> {
        GLOBAL_CATALOG.clone()
    }

    /// Register a factory.
    ///
    /// Returns an error if the class identifier is already registered.
    pub fn register(&self, factory: Arc<dyn BackendFactory>) -> Result<(), BackendError> {
        let class_name = factory.class_name().to_string();

        if self.factories.contains_key(&class_name) {
            return Err(BackendError::AlreadyRegistered(class_name));
        }

        debug!("Registered backend class {}", class_name);
        self.factories.insert(class_name, factory);
        Ok(())
    }

    /// Register `T`, constructed through its `Default` impl.
    pub fn register_default<T>(&self, class_name: impl Into<String>) -> Result<(), BackendError>
    where
        T: ReportingBackend + Default + 'static,
    {
        self.register(Arc::new(DefaultFactory::<T>::new(class_name)))
    }

    /// Register a constructor closure.
    pub fn register_fn<F>(&self, class_name: impl Into<String>, constructor: F) -> Result<(), BackendError>
    where
        F: Fn() -> Result<Box<dyn ReportingBackend>, BackendError> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnFactory {
            class_name: class_name.into(),
            constructor,
        }))
    }

    /// Unregister a class.
    pub fn unregister(&self, class_name: &str) -> Result<(), BackendError> {
        self.factories
            .remove(class_name)
            .ok_or_else(|| BackendError::ClassNotResolvable(class_name.to_string()))?;
        Ok(())
    }

    /// Refuse to hand out `class_name` until [`allow`](Self::allow) is called.
    pub fn deny(&self, class_name: impl Into<String>, reason: impl Into<String>) {
        self.denied.insert(class_name.into(), reason.into());
    }

    /// Lift a previous [`deny`](Self::deny).
    pub fn allow(&self, class_name: &str) {
        self.denied.remove(class_name);
    }

    /// Check if a class is registered.
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    /// List all registered class identifiers.
    pub fn class_names(&self) -> Vec<String> {
        self.factories.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for BackendCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassResolver for BackendCatalog {
    fn resolve_class(&self, class_name: &str) -> Result<Arc<dyn BackendFactory>, BackendError> {
        if let Some(reason) = self.denied.get(class_name) {
            return Err(BackendError::access_denied(class_name, reason.value().clone()));
        }
        self.factories
            .get(class_name)
            .map(|f| f.clone())
            .ok_or_else(|| BackendError::ClassNotResolvable(class_name.to_string()))
    }
}

/// Factory constructing `T` through `Default`.
struct DefaultFactory<T> {
    class_name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DefaultFactory<T> {
    fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> BackendFactory for DefaultFactory<T>
where
    T: ReportingBackend + Default + 'static,
{
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn instantiate(&self) -> Result<Box<dyn ReportingBackend>, BackendError> {
        Ok(Box::new(T::default()))
    }
}

struct FnFactory<F> {
    class_name: String,
    constructor: F,
}

impl<F> BackendFactory for FnFactory<F>
where
    F: Fn() -> Result<Box<dyn ReportingBackend>, BackendError> + Send + Sync,
{
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn instantiate(&self) -> Result<Box<dyn ReportingBackend>, BackendError> {
        (self.constructor)()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
