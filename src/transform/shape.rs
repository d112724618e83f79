//! Node shapes seen by the document-level rules.

use crate::config::TransformOptions;
use crate::tree::{Document, Element, NodeId};

/// What a node is to the passes outside markup content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape<'a> {
    /// A textbox element
    Textbox(&'a Element),
    /// Any other element
    Element(&'a Element),
    /// Text, comments, processing instructions and the prolog
    Other,
}

impl<'a> NodeShape<'a> {
    pub fn classify(doc: &'a Document, id: NodeId, options: &TransformOptions) -> Self {
        match doc.element(id) {
            Some(element) if is_textbox(element, options) => NodeShape::Textbox(element),
            Some(element) => NodeShape::Element(element),
            None => NodeShape::Other,
        }
    }
}

/// Whether `element` is a textbox under `options`.
#[inline]
pub fn is_textbox(element: &Element, options: &TransformOptions) -> bool {
    element
        .name
        .matches(&options.textbox_tag, options.textbox_namespace.as_deref())
}
