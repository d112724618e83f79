//! Copy-with-override traversal shared by every pass.
//!
//! The default rule copies each node unchanged. A [`Rewrite`] can take over
//! a whole node (and its subtree) or adjust the copy of an element.

use crate::tree::{Document, Element, NodeId, NodeKind};

/// Overrides applied while copying a document.
pub trait Rewrite {
    type Error;

    /// Produce the output for node `id` of `src` under `parent` in `out`.
    ///
    /// Returning `Ok(false)` falls back to the default copy of the node.
    fn replace(
        &mut self,
        _src: &Document,
        _id: NodeId,
        _out: &mut Document,
        _parent: Option<NodeId>,
    ) -> Result<bool, Self::Error> {
        Ok(false)
    }

    /// Adjust an element copied by the default rule. Children are copied
    /// afterwards.
    fn rewrite_element(&mut self, _element: &mut Element) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Copy `src` into a fresh document, applying `rewriter`.
///
/// The walk is a single pre-order pass; output nodes are appended in
/// document order, so output ids are in document order too.
pub fn copy_with<R: Rewrite>(src: &Document, rewriter: &mut R) -> Result<Document, R::Error> {
    let mut out = Document::with_capacity(src.len());
    let mut stack: Vec<(NodeId, Option<NodeId>)> =
        src.roots().iter().rev().map(|&id| (id, None)).collect();

    while let Some((id, parent)) = stack.pop() {
        if rewriter.replace(src, id, &mut out, parent)? {
            continue;
        }
        match src.node(id).kind() {
            NodeKind::Element(element) => {
                let mut copy = element.clone();
                rewriter.rewrite_element(&mut copy)?;
                let copy = out.append(parent, NodeKind::Element(copy));
                stack.extend(
                    src.node(id)
                        .children()
                        .iter()
                        .rev()
                        .map(|&child| (child, Some(copy))),
                );
            },
            other => {
                out.append(parent, other.clone());
            },
        }
    }
    Ok(out)
}
