//! Attribute storage for a context registry.

use std::collections::HashMap;

use metricsctx_protocols::AttributeValue;

/// Mutable attribute map.
///
/// Carries no lock of its own; the owning registry guards it.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    values: HashMap<String, AttributeValue>,
}

impl AttributeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// `AttributeValue::Null` is stored like any other value; use
    /// [`remove`](Self::remove) to delete an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Remove an attribute. Absent names are ignored.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.values.remove(name)
    }

    /// Snapshot of all attribute names, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
