//! Textbox index pre-pass.
//!
//! Textbox identifiers are positional: the n-th textbox a pass emits gets
//! index n. The tree is walked once up front and every emitted textbox's
//! index is stored by arena position, so rules look it up in constant time.
//!
//! A textbox keeps only its markup, so textboxes elsewhere inside it are
//! dropped and never numbered.

use crate::config::TransformOptions;
use crate::markup::find_markup;
use crate::transform::shape::is_textbox;
use crate::tree::{Document, NodeId};

/// Document-order indices of the textboxes of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextboxIndex {
    textboxes: Vec<NodeId>,
    by_node: Vec<Option<u32>>,
}

impl TextboxIndex {
    /// Walk `doc` once and number its textboxes, including those nested in
    /// another textbox's markup.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::config::TransformOptions;
    /// use svgtextbox::transform::TextboxIndex;
    /// use svgtextbox::tree::Document;
    ///
    /// let doc = Document::parse("<svg><textbox/><g><textbox/></g></svg>")?;
    /// let index = TextboxIndex::build(&doc, &TransformOptions::default());
    /// assert_eq!(index.len(), 2);
    /// assert_eq!(index.index_of(index.textboxes()[1]), Some(1));
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn build(doc: &Document, options: &TransformOptions) -> Self {
        Self::walk(doc, options, true)
    }

    /// Number only the textboxes that have no textbox ancestor.
    pub fn outermost(doc: &Document, options: &TransformOptions) -> Self {
        Self::walk(doc, options, false)
    }

    fn walk(doc: &Document, options: &TransformOptions, into_markup: bool) -> Self {
        let mut index = Self {
            textboxes: Vec::new(),
            by_node: vec![None; doc.len()],
        };
        let mut stack: Vec<NodeId> = doc.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if doc.element(id).is_some_and(|e| is_textbox(e, options)) {
                index.by_node[id.index()] = Some(index.textboxes.len() as u32);
                index.textboxes.push(id);
                if into_markup
                    && let Some(markup) = find_markup(doc, id, options)
                {
                    stack.push(markup);
                }
            } else {
                stack.extend(doc.node(id).children().iter().rev());
            }
        }
        index
    }

    /// Index of the textbox at `id`, or `None` if it is not a textbox.
    #[inline]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.by_node
            .get(id.index())
            .copied()
            .flatten()
            .map(|n| n as usize)
    }

    /// Textbox nodes in document order.
    #[inline]
    pub fn textboxes(&self) -> &[NodeId] {
        &self.textboxes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textboxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textboxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(index: &TextboxIndex) -> Vec<Option<usize>> {
        index.textboxes().iter().map(|&id| index.index_of(id)).collect()
    }

    #[test]
    fn test_textboxes_count_in_preorder() {
        let doc = Document::parse(
            "<svg><textbox><textbox/></textbox><g/><g><textbox/></g><markup/></svg>",
        )
        .unwrap();
        let index = TextboxIndex::build(&doc, &TransformOptions::default());
        // The inner textbox is outside any markup and is dropped
        assert_eq!(order(&index), [Some(0), Some(1)]);
        assert!(index.textboxes().windows(2).all(|w| w[0] < w[1]));

        let root = doc.root_element().unwrap();
        assert_eq!(index.index_of(root), None);
    }

    #[test]
    fn test_textboxes_inside_markup_are_numbered() {
        let doc = Document::parse(concat!(
            "<svg>",
            "<textbox><markup>a<b><textbox><markup>b</markup></textbox></b></markup></textbox>",
            "<textbox><markup>c</markup></textbox>",
            "</svg>"
        ))
        .unwrap();
        let options = TransformOptions::default();

        let index = TextboxIndex::build(&doc, &options);
        assert_eq!(order(&index), [Some(0), Some(1), Some(2)]);
        assert!(index.textboxes().windows(2).all(|w| w[0] < w[1]));

        let outer = TextboxIndex::outermost(&doc, &options);
        assert_eq!(outer.len(), 2);
        assert_eq!(outer.index_of(index.textboxes()[1]), None);
        assert_eq!(outer.index_of(index.textboxes()[2]), Some(1));
    }

    #[test]
    fn test_empty_document_index() {
        let doc = Document::parse("<svg/>").unwrap();
        let index = TextboxIndex::build(&doc, &TransformOptions::default());
        assert!(index.is_empty());
    }
}
