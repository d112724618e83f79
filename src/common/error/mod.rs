//! Unified error types for svgtextbox.
//!
//! This module provides the error type shared by the tree adapter, the
//! directive channel and all three transform passes.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
