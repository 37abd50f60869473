//! Context registry resolving logical names to reporting backends.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use metricsctx_config::{ConfigError, ConfigSource};
use metricsctx_protocols::{
    AttributeAccess, AttributeValue, BackendError, ClassResolver, ReportingBackend,
};

use crate::attributes::AttributeStore;
use crate::error::RegistryError;
use crate::noop::NOOP_BACKEND_CLASS;

/// Suffix of the attribute naming a context's backend class.
pub const CONTEXT_CLASS_SUFFIX: &str = ".class";

/// Factory and cache of metrics contexts.
///
/// Each context is constructed at most once and cached for the life of the
/// registry. Contexts are cached under their *context* name, while lookups
/// use the *ref* name; see [`resolve`](Self::resolve).
pub struct ContextRegistry {
    /// Guarded separately from `contexts` so backends can read attributes
    /// while a resolution holds the context lock.
    attributes: RwLock<AttributeStore>,
    contexts: Mutex<HashMap<String, Arc<dyn ReportingBackend>>>,
    resolver: Arc<dyn ClassResolver>,
}

impl ContextRegistry {
    /// Create a registry with no attributes.
    pub fn new(resolver: Arc<dyn ClassResolver>) -> Self {
        Self {
            attributes: RwLock::new(AttributeStore::new()),
            contexts: Mutex::new(HashMap::new()),
            resolver,
        }
    }

    /// Create a registry and load its attributes from `source`.
    ///
    /// Each configured key has the source's prefix stripped before it is
    /// stored. A source with no configuration yields an empty registry.
    pub fn load(
        source: &dyn ConfigSource,
        resolver: Arc<dyn ClassResolver>,
    ) -> Result<Self, RegistryError> {
        let registry = Self::new(resolver);
        info!("Created metrics context registry");
        registry.load_attributes(source)?;
        Ok(registry)
    }

    fn load_attributes(&self, source: &dyn ConfigSource) -> Result<(), ConfigError> {
        let Some(entries) = source.load()? else {
            debug!("No metrics configuration found");
            return Ok(());
        };

        let prefix = source.key_prefix();
        let mut attributes = self.attributes.write();
        for (key, value) in entries {
            let Some(name) = key.strip_prefix(prefix) else {
                debug!("Skipping config key {} without prefix {}", key, prefix);
                continue;
            };
            info!("Set metrics attribute {}={}", name, value);
            attributes.set(name, AttributeValue::String(value));
        }
        Ok(())
    }

    /// Get the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.read().get(name).cloned()
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// `AttributeValue::Null` is stored as-is rather than removing the
    /// attribute.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        debug!("Set metrics attribute {}", name);
        self.attributes.write().set(name, value);
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&self, name: &str) {
        self.attributes.write().remove(name);
    }

    /// Names of all attributes.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.read().keys()
    }

    /// Get the context for `ref_name`, constructing it as `context_name` on a miss.
    ///
    /// On a miss the class is taken from the `<ref_name>.class` attribute,
    /// defaulting to [`NOOP_BACKEND_CLASS`]. The new backend is initialized
    /// with `context_name` and cached under `context_name`, not `ref_name`:
    /// a later lookup of `context_name` hits it, a later lookup of a
    /// different `ref_name` builds a new instance.
    ///
    /// Failures are returned as-is and nothing is cached, so the call can be
    /// retried.
    pub fn resolve(
        &self,
        ref_name: &str,
        context_name: &str,
    ) -> Result<Arc<dyn ReportingBackend>, RegistryError> {
        let mut contexts = self.contexts.lock();
        if let Some(context) = contexts.get(ref_name) {
            return Ok(context.clone());
        }

        let context = self.construct(ref_name, context_name).map_err(|e| {
            warn!("Failed to create context {} (ref {}): {}", context_name, ref_name, e);
            e
        })?;
        contexts.insert(context_name.to_string(), context.clone());
        info!(
            "Created context={}, ref={}, class={}",
            context_name,
            ref_name,
            context.class_name()
        );
        Ok(context)
    }

    /// Get the context named `name`; same as `resolve(name, name)`.
    pub fn resolve_named(&self, name: &str) -> Result<Arc<dyn ReportingBackend>, RegistryError> {
        self.resolve(name, name)
    }

    fn construct(
        &self,
        ref_name: &str,
        context_name: &str,
    ) -> Result<Arc<dyn ReportingBackend>, BackendError> {
        let class_attribute = format!("{}{}", ref_name, CONTEXT_CLASS_SUFFIX);
        let class_name = match self.attribute(&class_attribute) {
            None => NOOP_BACKEND_CLASS.to_string(),
            Some(AttributeValue::String(class_name)) => class_name,
            Some(_) => {
                return Err(BackendError::InvalidClassAttribute {
                    attribute: class_attribute,
                });
            }
        };

        let factory = self.resolver.resolve_class(&class_name)?;
        let mut backend = factory.instantiate()?;
        backend.initialize(context_name, self)?;
        Ok(Arc::from(backend))
    }

    /// Snapshot of every context built so far.
    pub fn contexts(&self) -> Vec<Arc<dyn ReportingBackend>> {
        self.contexts.lock().values().cloned().collect()
    }

    /// Snapshot of the names contexts are cached under.
    pub fn context_names(&self) -> Vec<String> {
        self.contexts.lock().keys().cloned().collect()
    }

    /// Close every cached context. Contexts stay cached.
    pub fn close_all(&self) {
        for context in self.contexts() {
            debug!("Closing context {}", context.context_name());
            context.close();
        }
    }
}

impl AttributeAccess for ContextRegistry {
    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        ContextRegistry::attribute(self, name)
    }

    fn attribute_names(&self) -> Vec<String> {
        ContextRegistry::attribute_names(self)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
