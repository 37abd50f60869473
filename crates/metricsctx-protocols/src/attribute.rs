//! Registry attribute access.

/// Value stored under an attribute name.
///
/// Attributes loaded from configuration are always strings; callers may
/// store any JSON value.
pub type AttributeValue = serde_json::Value;

/// Read-only view of a registry's attributes.
///
/// Passed to [`ReportingBackend::initialize`](crate::ReportingBackend::initialize)
/// so a backend can pick up its own settings (for example `<context>.period`).
pub trait AttributeAccess: Send + Sync {
    /// Returns the value of the named attribute, if set.
    fn attribute(&self, name: &str) -> Option<AttributeValue>;

    /// Returns the names of all attributes currently set.
    fn attribute_names(&self) -> Vec<String>;

    /// Returns the attribute if it holds a string.
    fn attribute_str(&self, name: &str) -> Option<String> {
        match self.attribute(name) {
            Some(AttributeValue::String(s)) => Some(s),
            _ => None,
        }
    }
}
