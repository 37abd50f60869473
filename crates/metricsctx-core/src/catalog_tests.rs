use super::*;

#[test]
fn test_catalog_new_is_empty() {
    let catalog = BackendCatalog::new();
    assert!(catalog.class_names().is_empty());
    assert!(!catalog.contains(NOOP_BACKEND_CLASS));
}

#[test]
fn test_catalog_default() {
    let catalog = BackendCatalog::default();
    assert!(catalog.class_names().is_empty());
}

#[test]
fn test_with_builtins_has_noop() {
    let catalog = BackendCatalog::with_builtins();
    assert!(catalog.contains(NOOP_BACKEND_CLASS));

    let factory = catalog.resolve_class(NOOP_BACKEND_CLASS).unwrap();
    let backend = factory.instantiate().unwrap();
    assert!(backend.as_any().downcast_ref::<NoOpBackend>().is_some());
}

#[test]
fn test_register_default() {
    let catalog = BackendCatalog::new();
    catalog.register_default::<NoOpBackend>("acme.Quiet").unwrap();

    assert!(catalog.contains("acme.Quiet"));
    let factory = catalog.resolve_class("acme.Quiet").unwrap();
    assert_eq!(factory.class_name(), "acme.Quiet");
}

#[test]
fn test_register_duplicate() {
    let catalog = BackendCatalog::with_builtins();
    let result = catalog.register_default::<NoOpBackend>(NOOP_BACKEND_CLASS);
    assert!(matches!(result, Err(BackendError::AlreadyRegistered(_))));
}

#[test]
fn test_register_fn_propagates_instantiation_error() {
    let catalog = BackendCatalog::new();
    catalog
        .register_fn("acme.Broken", || {
            Err(BackendError::not_instantiable("acme.Broken", "abstract backend"))
        })
        .unwrap();

    let factory = catalog.resolve_class("acme.Broken").unwrap();
    let result = factory.instantiate();
    assert!(matches!(result, Err(BackendError::NotInstantiable { .. })));
}

#[test]
fn test_resolve_unknown_class() {
    let catalog = BackendCatalog::with_builtins();
    let result = catalog.resolve_class("acme.Missing");
    assert!(matches!(result, Err(BackendError::ClassNotResolvable(name)) if name == "acme.Missing"));
}

#[test]
fn test_deny_and_allow() {
    let catalog = BackendCatalog::with_builtins();
    catalog.deny(NOOP_BACKEND_CLASS, "disabled by operator");

    let result = catalog.resolve_class(NOOP_BACKEND_CLASS);
    assert!(matches!(result, Err(BackendError::AccessDenied { .. })));

    catalog.allow(NOOP_BACKEND_CLASS);
    assert!(catalog.resolve_class(NOOP_BACKEND_CLASS).is_ok());
}

#[test]
fn test_unregister() {
    let catalog = BackendCatalog::with_builtins();
    catalog.unregister(NOOP_BACKEND_CLASS).unwrap();
    assert!(!catalog.contains(NOOP_BACKEND_CLASS));
    assert!(catalog.unregister(NOOP_BACKEND_CLASS).is_err());
}

#[test]
fn test_global_catalog_is_shared() {
    let a = BackendCatalog::global();
    let b = BackendCatalog::global();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.contains(NOOP_BACKEND_CLASS));
}
