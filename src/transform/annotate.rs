//! Identity annotation: tag every textbox with its document-order id.

use std::convert::Infallible;

use log::{debug, warn};

use crate::config::TransformOptions;
use crate::markup::{find_markup, render_display_with};
use crate::transform::copy::{Rewrite, copy_with};
use crate::transform::index::TextboxIndex;
use crate::tree::{Attribute, Attributes, Document, Element, NodeId, NodeKind};

struct Annotator<'a> {
    options: &'a TransformOptions,
    index: TextboxIndex,
}

impl Annotator<'_> {
    /// Emit the `n`-th textbox with only its rendered markup. Textboxes
    /// inside the markup are emitted the same way, in place.
    fn write_textbox(
        &self,
        src: &Document,
        id: NodeId,
        n: usize,
        out: &mut Document,
        parent: Option<NodeId>,
    ) {
        let Some(element) = src.element(id) else {
            return;
        };
        let textbox = Element {
            name: element.name.clone(),
            attributes: identified_attributes(element, &self.options.textbox_id(n), self.options),
        };
        let textbox = out.append(parent, NodeKind::Element(textbox));

        match find_markup(src, id, self.options) {
            Some(markup) => {
                let copy = src.node(markup).kind().clone();
                let copy = out.append(Some(textbox), copy);
                render_display_with(
                    src,
                    markup,
                    out,
                    copy,
                    self.options,
                    &mut |src: &Document, child: NodeId, out: &mut Document, parent: NodeId| {
                        match self.index.index_of(child) {
                            Some(n) => {
                                self.write_textbox(src, child, n, out, Some(parent));
                                true
                            },
                            None => false,
                        }
                    },
                );
            },
            None => warn!(
                "Textbox {} has no <{}> element",
                self.options.textbox_id(n),
                self.options.markup_tag
            ),
        }
    }
}

impl Rewrite for Annotator<'_> {
    type Error = Infallible;

    fn replace(
        &mut self,
        src: &Document,
        id: NodeId,
        out: &mut Document,
        parent: Option<NodeId>,
    ) -> Result<bool, Infallible> {
        let Some(n) = self.index.index_of(id) else {
            return Ok(false);
        };
        self.write_textbox(src, id, n, out, parent);
        Ok(true)
    }
}

/// The identifier attribute followed by every original attribute except a
/// stale identifier.
fn identified_attributes(element: &Element, id: &str, options: &TransformOptions) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.push(Attribute::new(&options.id_attribute, id));
    for attr in &element.attributes {
        if attr.name.qualified_name != options.id_attribute {
            attributes.push(attr.clone());
        }
    }
    attributes
}

/// Copy `doc`, giving every textbox an identifier attribute and keeping only
/// its processed markup.
///
/// # Examples
///
/// ```
/// use svgtextbox::config::TransformOptions;
/// use svgtextbox::transform::annotate;
/// use svgtextbox::tree::Document;
///
/// let doc = Document::parse(r#"<svg><textbox x="1"><rect/><markup> Hi </markup></textbox></svg>"#)?;
/// let out = annotate(&doc, &TransformOptions::default());
/// assert_eq!(
///     out.to_xml_string(),
///     r#"<svg><textbox __id="textbox-0" x="1"><markup>Hi</markup></textbox></svg>"#
/// );
/// # Ok::<(), svgtextbox::Error>(())
/// ```
pub fn annotate(doc: &Document, options: &TransformOptions) -> Document {
    let index = TextboxIndex::build(doc, options);
    debug!("Annotating {} textboxes", index.len());
    let mut annotator = Annotator { options, index };
    let Ok(out) = copy_with(doc, &mut annotator);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate_xml(xml: &str) -> String {
        let doc = Document::parse(xml).unwrap();
        annotate(&doc, &TransformOptions::default()).to_xml_string()
    }

    #[test]
    fn test_ids_follow_document_order() {
        let out = annotate_xml(concat!(
            "<svg>",
            "<textbox><markup>a</markup></textbox>",
            "<g><textbox><markup>b</markup></textbox></g>",
            "<textbox><markup>c</markup></textbox>",
            "</svg>"
        ));
        assert_eq!(
            out,
            concat!(
                "<svg>",
                "<textbox __id=\"textbox-0\"><markup>a</markup></textbox>",
                "<g><textbox __id=\"textbox-1\"><markup>b</markup></textbox></g>",
                "<textbox __id=\"textbox-2\"><markup>c</markup></textbox>",
                "</svg>"
            )
        );
    }

    #[test]
    fn test_other_nodes_copied_unchanged() {
        let xml = concat!(
            "<?xml version=\"1.0\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\">\n",
            "  <!-- keep -->\n  <g id=\"surface1\"><rect x=\"0\"/>  text  </g>\n",
            "</svg>"
        );
        assert_eq!(annotate_xml(xml), xml);
    }

    #[test]
    fn test_markup_rendering_and_attribute_order() {
        let out = annotate_xml(concat!(
            "<textbox width=\"200\" __id=\"old\" height=\"50\">",
            "<desc>dropped</desc>",
            "<markup lang=\"en\">  Hello <br/> World<preserved-space/>! <divider/></markup>",
            "</textbox>"
        ));
        assert_eq!(
            out,
            concat!(
                "<textbox __id=\"textbox-0\" width=\"200\" height=\"50\">",
                "<markup lang=\"en\">Hello\nWorld !<span size=\"larger\">⁂</span></markup>",
                "</textbox>"
            )
        );
    }

    #[test]
    fn test_textbox_without_markup_is_emptied() {
        assert_eq!(
            annotate_xml("<svg><textbox x=\"1\"><rect/></textbox></svg>"),
            "<svg><textbox __id=\"textbox-0\" x=\"1\"/></svg>"
        );
    }

    #[test]
    fn test_textbox_inside_markup_gets_next_id() {
        let out = annotate_xml(concat!(
            "<svg>",
            "<textbox><markup>a<textbox><markup>b</markup></textbox></markup></textbox>",
            "<textbox><markup>c</markup></textbox>",
            "</svg>"
        ));
        assert_eq!(
            out,
            concat!(
                "<svg>",
                "<textbox __id=\"textbox-0\"><markup>a",
                "<textbox __id=\"textbox-1\"><markup>b</markup></textbox>",
                "</markup></textbox>",
                "<textbox __id=\"textbox-2\"><markup>c</markup></textbox>",
                "</svg>"
            )
        );
    }

    #[test]
    fn test_textbox_outside_markup_is_dropped() {
        assert_eq!(
            annotate_xml(concat!(
                "<svg><textbox><markup>a</markup><g><textbox><markup>x</markup></textbox></g></textbox>",
                "<textbox><markup>b</markup></textbox></svg>"
            )),
            concat!(
                "<svg><textbox __id=\"textbox-0\"><markup>a</markup></textbox>",
                "<textbox __id=\"textbox-1\"><markup>b</markup></textbox></svg>"
            )
        );
    }

    #[test]
    fn test_custom_names() {
        let doc = Document::parse("<svg><box><content>x</content></box></svg>").unwrap();
        let options = TransformOptions::new()
            .with_textbox_tag("box")
            .with_markup_tag("content")
            .with_id_attribute("data-id")
            .with_id_prefix("b");
        assert_eq!(
            annotate(&doc, &options).to_xml_string(),
            "<svg><box data-id=\"b0\"><content>x</content></box></svg>"
        );
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Random nesting of groups, textboxes and text
    fn document() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            Just("<textbox><markup>t</markup></textbox>".to_string()),
            Just("<textbox><markup>t<i><textbox><markup>u</markup></textbox></i></markup></textbox>".to_string()),
            Just("<rect/>".to_string()),
            "[a-z ]{0,4}",
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop::collection::vec(inner, 0..6).prop_map(|children| format!("<g>{}</g>", children.concat()))
        })
        .prop_map(|body| format!("<svg>{}</svg>", body))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_ids_are_sequential(xml in document()) {
            let options = TransformOptions::default();
            let doc = Document::parse(&xml).unwrap();
            let expected = xml.matches("<textbox>").count();

            let out = annotate(&doc, &options);
            let ids: Vec<String> = out
                .iter()
                .filter_map(|id| out.element(id))
                .filter(|e| e.local_name() == "textbox")
                .filter_map(|e| e.attribute("__id").map(str::to_string))
                .collect();
            let sequence: Vec<String> = (0..expected).map(|n| options.textbox_id(n)).collect();
            prop_assert_eq!(ids, sequence);
        }
    }
}
