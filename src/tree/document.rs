//! Arena-backed document tree.

use crate::tree::node::{Element, Node, NodeId, NodeKind};

/// An ordered, rooted XML tree stored in an arena.
///
/// The top-level sequence holds the prolog (declaration, doctype, comments,
/// processing instructions, whitespace) around the root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            roots: Vec::new(),
        }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in document order.
    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `parent`, or the top-level nodes for `None`.
    #[inline]
    pub fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self.nodes[id.index()].children,
            None => &self.roots,
        }
    }

    /// Access a node. Panics if `id` does not belong to this document.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Access a node if `id` is in range.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// The element at `id`, if it is one.
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).as_element()
    }

    /// The first top-level element.
    pub fn root_element(&self) -> Option<NodeId> {
        self.roots
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    /// Append a node as the last child of `parent` (or at top level).
    pub fn append(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent_id) => self.nodes[parent_id.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Append character data, merging with a directly preceding text node.
    pub fn append_text(&mut self, parent: Option<NodeId>, text: &str) -> Option<NodeId> {
        if text.is_empty() {
            return None;
        }
        if let Some(&last) = self.children_of(parent).last()
            && let NodeKind::Text(existing) = &mut self.nodes[last.index()].kind
        {
            existing.push_str(text);
            return Some(last);
        }
        Some(self.append(parent, NodeKind::Text(text.to_string())))
    }

    /// Pre-order iterator over `id` and all of its descendants.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Pre-order iterator over every node of the document.
    pub fn iter(&self) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Concatenated character data of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|child| self.node(child).as_text())
            .collect()
    }
}

/// Document-order traversal
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.node(id).children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.append(None, NodeKind::Element(Element::new("svg")));
        let g = doc.append(Some(root), NodeKind::Element(Element::new("g")));
        doc.append(Some(g), NodeKind::Text("a".to_string()));
        doc.append(Some(root), NodeKind::Text("b".to_string()));
        (doc, root)
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let (doc, root) = sample();
        let order: Vec<usize> = doc.descendants(root).map(NodeId::index).collect();
        assert_eq!(order, [0, 1, 2, 3]);
        assert_eq!(doc.text_content(root), "ab");
    }

    #[test]
    fn test_append_text_merges_adjacent_text() {
        let (mut doc, root) = sample();
        let merged = doc.append_text(Some(root), "c");
        assert_eq!(merged.map(NodeId::index), Some(3));
        assert_eq!(doc.node(NodeId(3)).as_text(), Some("bc"));
        assert_eq!(doc.append_text(Some(root), ""), None);
    }

    #[test]
    fn test_root_element_skips_prolog() {
        let mut doc = Document::new();
        doc.append(None, NodeKind::Comment(" prolog ".to_string()));
        let root = doc.append(None, NodeKind::Element(Element::new("svg")));
        assert_eq!(doc.root_element(), Some(root));
        assert_eq!(doc.iter().count(), 2);
    }
}
