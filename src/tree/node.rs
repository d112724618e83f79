//! Node types of the document arena.

use crate::tree::attributes::Attributes;
use crate::tree::qname::QualifiedName;

/// Identity of a node: its index in the owning [`Document`](super::Document) arena.
///
/// Ids are assigned in document order while a tree is built, so comparing
/// ids of the same document compares document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index of the node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An element: qualified name plus ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QualifiedName,
    pub attributes: Attributes,
}

impl Element {
    /// Create an element with an unresolved name and no attributes.
    pub fn new(name: &str) -> Self {
        Self {
            name: QualifiedName::new(name),
            attributes: Attributes::new(),
        }
    }

    /// Local name (without prefix).
    #[inline]
    pub fn local_name(&self) -> &str {
        &self.name.local_name
    }

    /// Attribute value by qualified name.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }
}

/// `<?target data?>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingInstruction {
    pub target: String,
    pub data: String,
}

impl ProcessingInstruction {
    pub fn new(target: &str, data: &str) -> Self {
        Self {
            target: target.to_string(),
            data: data.to_string(),
        }
    }

    /// Split raw instruction content (`target data`) at the first whitespace.
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim_start();
        match raw.find(crate::common::is_xml_whitespace) {
            Some(split) => Self {
                target: raw[..split].to_string(),
                data: raw[split..].trim_start().to_string(),
            },
            None => Self::new(raw, ""),
        }
    }
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    /// Character data, already unescaped
    Text(String),
    /// CDATA section content
    CData(String),
    Comment(String),
    ProcessingInstruction(ProcessingInstruction),
    /// Content of the XML declaration (`xml version="1.0"`)
    Declaration(String),
    /// Content of the doctype declaration
    DocType(String),
}

/// A node in the arena with its links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Text of a text or CDATA node.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::CData(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn as_processing_instruction(&self) -> Option<&ProcessingInstruction> {
        match &self.kind {
            NodeKind::ProcessingInstruction(pi) => Some(pi),
            _ => None,
        }
    }
}
