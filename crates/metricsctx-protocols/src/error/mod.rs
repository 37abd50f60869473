//! Error types for the protocol layer.

mod backend;

pub use backend::*;
