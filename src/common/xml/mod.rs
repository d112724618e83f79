//! XML text utilities used by the tree writer.

pub mod escape;

pub use escape::{escape_attribute, escape_text};
