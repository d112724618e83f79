//! Markup content of a textbox.
//!
//! A textbox carries its display text in a markup container: text nodes
//! interleaved with three marker elements and, optionally, Pango inline
//! formatting elements. The same classification drives both the display
//! rendering used when annotating and the text extraction used for records.
//!
//! | Node                  | Display            | Extracted text      |
//! |-----------------------|--------------------|---------------------|
//! | text                  | normalized         | normalized          |
//! | `<br/>`               | line feed          | line feed           |
//! | `<preserved-space/>`  | one space          | one space           |
//! | `<divider/>`          | glyph in a `span`  | glyph (optional)    |

use phf::{phf_map, phf_set};

use crate::common::normalize_space;
use crate::config::{DividerOptions, MarkupMode, TransformOptions};
use crate::tree::{Attribute, Document, Element, NodeId, NodeKind, QualifiedName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    LineBreak,
    PreservedSpace,
    Divider,
}

static MARKERS: phf::Map<&'static str, Marker> = phf_map! {
    "br" => Marker::LineBreak,
    "preserved-space" => Marker::PreservedSpace,
    "divider" => Marker::Divider,
};

/// Pango markup inline elements
static INLINE_TAGS: phf::Set<&'static str> = phf_set! {
    "b", "big", "i", "s", "small", "span", "sub", "sup", "tt", "u",
};

/// Shape of a node inside a markup subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupShape<'a> {
    /// Character data, subject to whitespace normalization
    Text(&'a str),
    /// `<br/>`: a literal line feed
    LineBreak,
    /// `<preserved-space/>`: exactly one space, never normalized
    PreservedSpace,
    /// `<divider/>`: the decorative separator
    Divider,
    /// A Pango inline formatting element
    Inline(&'a Element),
    /// Any other element; only its content counts as text
    Container(&'a Element),
    /// Comments and processing instructions
    Other,
}

impl<'a> MarkupShape<'a> {
    /// Classify the node at `id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::markup::MarkupShape;
    /// use svgtextbox::tree::Document;
    ///
    /// let doc = Document::parse("<markup>a<br/></markup>")?;
    /// let root = doc.root_element().unwrap();
    /// let children = doc.node(root).children();
    /// assert_eq!(MarkupShape::classify(&doc, children[0]), MarkupShape::Text("a"));
    /// assert_eq!(MarkupShape::classify(&doc, children[1]), MarkupShape::LineBreak);
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn classify(doc: &'a Document, id: NodeId) -> Self {
        let node = doc.node(id);
        if let Some(text) = node.as_text() {
            return MarkupShape::Text(text);
        }
        let Some(element) = node.as_element() else {
            return MarkupShape::Other;
        };
        match MARKERS.get(element.local_name()) {
            Some(Marker::LineBreak) => MarkupShape::LineBreak,
            Some(Marker::PreservedSpace) => MarkupShape::PreservedSpace,
            Some(Marker::Divider) => MarkupShape::Divider,
            None if INLINE_TAGS.contains(element.local_name()) => MarkupShape::Inline(element),
            None => MarkupShape::Container(element),
        }
    }
}

/// First markup container below `textbox`, in document order.
pub fn find_markup(doc: &Document, textbox: NodeId, options: &TransformOptions) -> Option<NodeId> {
    doc.descendants(textbox).skip(1).find(|&id| {
        doc.element(id)
            .is_some_and(|element| element.local_name() == options.markup_tag)
    })
}

/// Render the content of `markup` for display, appending it under `parent`
/// in `out`.
///
/// Text is normalized, markers become their literal text and dividers are
/// wrapped in a styling `span`. Elements are copied with their content
/// rendered the same way.
pub fn render_display(
    src: &Document,
    markup: NodeId,
    out: &mut Document,
    parent: NodeId,
    options: &TransformOptions,
) {
    render_display_with(src, markup, out, parent, options, &mut |_, _, _, _| false);
}

/// Like [`render_display`], but every element is first offered to
/// `intercept`, which returns `true` when it wrote the element itself.
pub fn render_display_with(
    src: &Document,
    markup: NodeId,
    out: &mut Document,
    parent: NodeId,
    options: &TransformOptions,
    intercept: &mut dyn FnMut(&Document, NodeId, &mut Document, NodeId) -> bool,
) {
    let namespace_uri = src
        .element(markup)
        .and_then(|element| element.name.namespace_uri.as_deref());

    for &child in src.node(markup).children() {
        match MarkupShape::classify(src, child) {
            MarkupShape::Text(text) => {
                out.append_text(Some(parent), &normalize_space(text));
            },
            MarkupShape::LineBreak => {
                out.append_text(Some(parent), "\n");
            },
            MarkupShape::PreservedSpace => {
                out.append_text(Some(parent), " ");
            },
            MarkupShape::Divider => append_divider(out, parent, namespace_uri, &options.divider),
            MarkupShape::Inline(element) | MarkupShape::Container(element) => {
                if intercept(src, child, out, parent) {
                    continue;
                }
                let copy = out.append(Some(parent), NodeKind::Element(element.clone()));
                render_display_with(src, child, out, copy, options, intercept);
            },
            MarkupShape::Other => {
                out.append(Some(parent), src.node(child).kind().clone());
            },
        }
    }
}

fn append_divider(
    out: &mut Document,
    parent: NodeId,
    namespace_uri: Option<&str>,
    divider: &DividerOptions,
) {
    let mut span = Element {
        name: QualifiedName::with_namespace("span", namespace_uri),
        attributes: Default::default(),
    };
    for (name, value) in &divider.attributes {
        span.attributes.push(Attribute::new(name, value.as_str()));
    }
    let span = out.append(Some(parent), NodeKind::Element(span));
    out.append_text(Some(span), &divider.glyph);
}

/// Flatten the content of `markup` into the record's markup value.
///
/// In [`MarkupMode::Text`] inline elements contribute only their text and
/// the divider contributes its glyph when `divider.in_text` is set. In
/// [`MarkupMode::Pango`] the display rendering is written out as escaped
/// markup text, dividers included.
///
/// # Examples
///
/// ```
/// use svgtextbox::config::TransformOptions;
/// use svgtextbox::markup::extract_text;
/// use svgtextbox::tree::Document;
///
/// let doc = Document::parse("<markup>  Hello <br/> World<preserved-space/>again </markup>")?;
/// let markup = doc.root_element().unwrap();
/// let text = extract_text(&doc, markup, &TransformOptions::default());
/// assert_eq!(text, "Hello\nWorld again");
/// # Ok::<(), svgtextbox::Error>(())
/// ```
pub fn extract_text(doc: &Document, markup: NodeId, options: &TransformOptions) -> String {
    match options.markup_mode {
        MarkupMode::Text => {
            let mut text = String::new();
            collect_text(doc, markup, &options.divider, &mut text);
            text
        },
        MarkupMode::Pango => {
            let mut scratch = Document::new();
            let container = match doc.element(markup) {
                Some(element) => element.clone(),
                None => Element::new(&options.markup_tag),
            };
            let root = scratch.append(None, NodeKind::Element(container));
            render_display(doc, markup, &mut scratch, root, options);

            let mut text = String::new();
            scratch.write_children(root, &mut text);
            text
        },
    }
}

fn collect_text(doc: &Document, id: NodeId, divider: &DividerOptions, text: &mut String) {
    for &child in doc.node(id).children() {
        match MarkupShape::classify(doc, child) {
            MarkupShape::Text(raw) => text.push_str(&normalize_space(raw)),
            MarkupShape::LineBreak => text.push('\n'),
            MarkupShape::PreservedSpace => text.push(' '),
            MarkupShape::Divider => {
                if divider.in_text {
                    text.push_str(&divider.glyph);
                }
            },
            MarkupShape::Inline(_) | MarkupShape::Container(_) => {
                collect_text(doc, child, divider, text)
            },
            MarkupShape::Other => {},
        }
    }
}
