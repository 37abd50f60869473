//! Reporting backend protocol definitions.

use std::any::Any;
use std::sync::Arc;

use crate::attribute::AttributeAccess;
use crate::error::BackendError;

/// A metrics context produced by a registry.
///
/// Implementations are constructed through a [`BackendFactory`], then
/// [`initialize`](ReportingBackend::initialize)d exactly once before being
/// shared. After that point they are only reachable through `&self`, so any
/// state that changes later (monitoring flags, buffers) needs interior
/// mutability.
pub trait ReportingBackend: Send + Sync {
    /// Initialize the backend with its context name.
    ///
    /// The registry is passed so the backend can read its attributes. Calling
    /// back into the registry to resolve another context from here deadlocks.
    fn initialize(
        &mut self,
        context_name: &str,
        registry: &dyn AttributeAccess,
    ) -> Result<(), BackendError>;

    /// Context name given at initialization.
    fn context_name(&self) -> &str;

    /// Class identifier of this implementation.
    fn class_name(&self) -> &str;

    /// Start periodic reporting.
    fn start_monitoring(&self) -> Result<(), BackendError> {
        Ok(())
    }

    /// Stop periodic reporting.
    fn stop_monitoring(&self) {}

    /// Whether periodic reporting is active.
    fn is_monitoring(&self) -> bool {
        false
    }

    /// Stop monitoring and release any held resources.
    fn close(&self) {
        self.stop_monitoring();
    }

    /// Get as Any for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Constructor for one backend class.
pub trait BackendFactory: Send + Sync {
    /// Identifier this factory is registered under.
    fn class_name(&self) -> &str;

    /// Create a fresh, uninitialized backend.
    fn instantiate(&self) -> Result<Box<dyn ReportingBackend>, BackendError>;
}

/// Resolves class identifiers to backend factories.
pub trait ClassResolver: Send + Sync {
    /// Look up the factory for `class_name`.
    fn resolve_class(&self, class_name: &str) -> Result<Arc<dyn BackendFactory>, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct Plain {
        name: String,
    }

    impl ReportingBackend for Plain {
        fn initialize(
            &mut self,
            context_name: &str,
            _registry: &dyn AttributeAccess,
        ) -> Result<(), BackendError> {
            self.name = context_name.to_string();
            Ok(())
        }

        fn context_name(&self) -> &str {
            &self.name
        }

        fn class_name(&self) -> &str {
            "test.Plain"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct Monitored {
        running: AtomicBool,
    }

    impl ReportingBackend for Monitored {
        fn initialize(
            &mut self,
            _context_name: &str,
            _registry: &dyn AttributeAccess,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        fn context_name(&self) -> &str {
            "monitored"
        }

        fn class_name(&self) -> &str {
            "test.Monitored"
        }

        fn start_monitoring(&self) -> Result<(), BackendError> {
            self.running.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn stop_monitoring(&self) {
            self.running.store(false, Ordering::SeqCst);
        }

        fn is_monitoring(&self) -> bool {
            self.running.load(Ordering::SeqCst)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_default_lifecycle_is_inert() {
        let backend = Plain::default();
        assert!(backend.start_monitoring().is_ok());
        assert!(!backend.is_monitoring());
        backend.close();
        assert!(!backend.is_monitoring());
    }

    #[test]
    fn test_close_stops_monitoring() {
        let backend = Monitored::default();
        backend.start_monitoring().unwrap();
        assert!(backend.is_monitoring());
        backend.close();
        assert!(!backend.is_monitoring());
    }

    #[test]
    fn test_downcast() {
        let backend: Box<dyn ReportingBackend> = Box::new(Plain::default());
        assert!(backend.as_any().downcast_ref::<Plain>().is_some());
        assert!(backend.as_any().downcast_ref::<Monitored>().is_none());
    }
}
