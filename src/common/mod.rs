//! Common types and utilities shared across the transform passes.
//!
//! This module holds the unified error type, XML escaping, whitespace
//! normalization and XPath-style number handling.

// Submodule declarations
pub mod error;
pub mod number;
pub mod whitespace;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use whitespace::{is_xml_whitespace, normalize_space, trim_xml};
