//! Process-wide registry access.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use metricsctx_config::{ConfigSource, FileConfigSource};
use metricsctx_protocols::ClassResolver;

use crate::catalog::BackendCatalog;
use crate::context::ContextRegistry;
use crate::error::RegistryError;

static GLOBAL: GlobalRegistry = GlobalRegistry::new();

/// Holder for a registry that is created at most once.
///
/// Concurrent first callers block until one of them has finished loading;
/// all of them then see the same instance. A failed load leaves the holder
/// empty, so a later call loads again.
pub struct GlobalRegistry {
    cell: OnceCell<Arc<ContextRegistry>>,
}

impl GlobalRegistry {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Get the registry, loading it from `source` on first use.
    ///
    /// `source` and `resolver` are ignored once the registry exists.
    pub fn get_or_load(
        &self,
        source: &dyn ConfigSource,
        resolver: Arc<dyn ClassResolver>,
    ) -> Result<Arc<ContextRegistry>, RegistryError> {
        self.cell
            .get_or_try_init(|| ContextRegistry::load(source, resolver).map(Arc::new))
            .cloned()
    }

    /// Get the registry if it has been loaded.
    pub fn get(&self) -> Option<Arc<ContextRegistry>> {
        self.cell.get().cloned()
    }
}

impl Default for GlobalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry.
///
/// Loaded on first use from [`FileConfigSource::from_env`], resolving
/// classes through [`BackendCatalog::global`]. Register plugin backends in
/// that catalog before the first resolution that needs them.
pub fn global() -> Result<Arc<ContextRegistry>, RegistryError> {
    if let Some(registry) = GLOBAL.get() {
        return Ok(registry);
    }
    GLOBAL.get_or_load(&FileConfigSource::from_env(), BackendCatalog::global())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    use metricsctx_config::ConfigError;

    #[derive(Default)]
    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    impl ConfigSource for CountingSource {
        fn load(&self) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            if self.fail {
                return Err(ConfigError::InvalidFormat("unreadable".to_string()));
            }
            let mut entries = BTreeMap::new();
            entries.insert("metrics.dfs.period".to_string(), "10".to_string());
            Ok(Some(entries))
        }
    }

    #[test]
    fn test_get_before_load() {
        let holder = GlobalRegistry::new();
        assert!(holder.get().is_none());
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        const THREADS: usize = 16;

        let holder = GlobalRegistry::new();
        let source = CountingSource::default();
        let barrier = Barrier::new(THREADS);

        let registries: Vec<Arc<ContextRegistry>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        holder
                            .get_or_load(&source, Arc::new(BackendCatalog::with_builtins()))
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        for registry in &registries[1..] {
            assert!(Arc::ptr_eq(&registries[0], registry));
        }
        assert!(registries[0].attribute("dfs.period").is_some());
    }

    #[test]
    fn test_failed_load_publishes_nothing() {
        let holder = GlobalRegistry::new();
        let failing = CountingSource {
            fail: true,
            ..Default::default()
        };

        let result = holder.get_or_load(&failing, Arc::new(BackendCatalog::new()));
        assert!(matches!(result, Err(RegistryError::ConfigurationUnavailable(_))));
        assert!(holder.get().is_none());

        let working = CountingSource::default();
        let registry = holder
            .get_or_load(&working, Arc::new(BackendCatalog::new()))
            .unwrap();
        assert!(Arc::ptr_eq(&registry, &holder.get().unwrap()));
        assert_eq!(working.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_later_sources_are_ignored() {
        let holder = GlobalRegistry::new();
        let first = CountingSource::default();
        let second = CountingSource::default();

        let a = holder.get_or_load(&first, Arc::new(BackendCatalog::new())).unwrap();
        let b = holder.get_or_load(&second, Arc::new(BackendCatalog::new())).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(second.loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_global_is_stable() {
        let a = global().unwrap();
        let b = global().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
