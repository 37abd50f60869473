//! # metricsctx Core
//!
//! Registry handing out metrics contexts by logical name.
//!
//! ## Components
//!
//! - [`ContextRegistry`] - Resolves names to backends chosen by the `<name>.class` attribute
//! - [`GlobalRegistry`] - Once-initialized holder for the process-wide registry
//! - [`BackendCatalog`] - Maps class identifiers to backend factories
//! - [`AttributeStore`] - Attribute map owned by a registry
//! - [`NoOpBackend`] - Backend that discards everything, also the default class
//!
//! ## Resolution
//!
//! On a cache miss the registry reads `<ref_name>.class`, falls back to
//! [`NOOP_BACKEND_CLASS`], instantiates the class through its
//! [`ClassResolver`](metricsctx_protocols::ClassResolver), initializes it and
//! caches it under the context name.

pub mod attributes;
pub mod catalog;
pub mod context;
pub mod error;
pub mod global;
pub mod noop;

pub use attributes::AttributeStore;
pub use catalog::BackendCatalog;
pub use context::{ContextRegistry, CONTEXT_CLASS_SUFFIX};
pub use error::RegistryError;
pub use global::{global, GlobalRegistry};
pub use noop::{noop_backend, NoOpBackend, NOOP_BACKEND_CLASS};
