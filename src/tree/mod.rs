//! Document tree: the ordered element/text tree every pass reads and builds.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]; passes never mutate their input and always build a fresh
//! document.

pub mod attributes;
pub mod document;
pub mod node;
pub mod parser;
pub mod qname;
pub mod writer;

pub use attributes::{Attribute, Attributes};
pub use document::{Descendants, Document};
pub use node::{Element, Node, NodeId, NodeKind, ProcessingInstruction};
pub use qname::{NamespaceContext, QualifiedName};
