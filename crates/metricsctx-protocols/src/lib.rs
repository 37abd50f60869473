//! # metricsctx Protocols
//!
//! Trait definitions shared by the context registry and backend plugins.
//!
//! ## Core Traits
//!
//! - [`ReportingBackend`] - A metrics context a registry hands out by name
//! - [`BackendFactory`] - Constructs a backend for one class identifier
//! - [`ClassResolver`] - Maps class identifiers to factories
//! - [`AttributeAccess`] - Read access to registry attributes during initialization

pub mod attribute;
pub mod backend;
pub mod error;

pub use attribute::{AttributeAccess, AttributeValue};
pub use backend::{BackendFactory, ClassResolver, ReportingBackend};
pub use error::BackendError;
