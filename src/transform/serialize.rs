//! Record serialization: replace every textbox by its JSON record.

use log::{debug, trace, warn};

use crate::common::{Error, Result};
use crate::config::TransformOptions;
use crate::markup::{extract_text, find_markup};
use crate::record::Record;
use crate::transform::copy::{Rewrite, copy_with};
use crate::transform::index::TextboxIndex;
use crate::tree::{Attribute, Attributes, Document, Element, NodeId, NodeKind};

struct RecordWriter<'a> {
    options: &'a TransformOptions,
    index: TextboxIndex,
}

impl Rewrite for RecordWriter<'_> {
    type Error = Error;

    fn replace(
        &mut self,
        src: &Document,
        id: NodeId,
        out: &mut Document,
        parent: Option<NodeId>,
    ) -> Result<bool> {
        let (Some(n), Some(element)) = (self.index.index_of(id), src.element(id)) else {
            return Ok(false);
        };
        let textbox_id = self.options.textbox_id(n);
        let record = textbox_record(src, id, element, &textbox_id, self.options);
        let json = record.to_json()?;
        trace!("Serialized {} ({} attributes)", textbox_id, record.entries().len());

        // Namespace declarations stay on the element so the output keeps
        // resolving the same way.
        let mut attributes = Attributes::new();
        attributes.push(Attribute::new(&self.options.id_attribute, textbox_id));
        for decl in element.attributes.namespace_declarations() {
            attributes.push(decl.clone());
        }
        let textbox = Element {
            name: element.name.clone(),
            attributes,
        };
        let textbox = out.append(parent, NodeKind::Element(textbox));
        out.append(Some(textbox), NodeKind::Text(json));
        Ok(true)
    }
}

/// Build the record of one textbox.
///
/// An existing identifier attribute is replaced by `textbox_id`. An
/// attribute named like the markup key is kept as an ordinary entry, so the
/// record carries that key twice; [`ParsedRecord`](crate::record::ParsedRecord)
/// reads the last one as the markup.
pub fn textbox_record(
    doc: &Document,
    id: NodeId,
    element: &Element,
    textbox_id: &str,
    options: &TransformOptions,
) -> Record {
    let mut record = Record::with_keys(&options.id_attribute, textbox_id, &options.markup_key);
    for attr in &element.attributes {
        let name = attr.name.qualified_name.as_str();
        if attr.name.is_namespace_declaration() {
            continue;
        }
        if name == options.id_attribute {
            trace!("Replacing {}=\"{}\" with {}", name, attr.value, textbox_id);
            continue;
        }
        if name == options.markup_key {
            warn!(
                "Textbox {} has a {} attribute; its record repeats that key",
                textbox_id, name
            );
        }
        record.push_attribute(name, &attr.value);
    }

    match find_markup(doc, id, options) {
        Some(markup) => record.set_markup(extract_text(doc, markup, options)),
        None => warn!("Textbox {} has no <{}> element", textbox_id, options.markup_tag),
    }
    record
}

/// Copy `doc`, replacing every textbox by an element holding its record.
///
/// # Examples
///
/// ```
/// use svgtextbox::config::TransformOptions;
/// use svgtextbox::transform::serialize;
/// use svgtextbox::tree::Document;
///
/// let doc = Document::parse(r#"<svg><textbox x="10" font="007"><markup> Hi </markup></textbox></svg>"#)?;
/// let out = serialize(&doc, &TransformOptions::default())?;
/// assert_eq!(
///     out.to_xml_string(),
///     "<svg><textbox __id=\"textbox-0\">{\n\"__id\": \"textbox-0\",\n\"x\": 10,\n\"font\": \"007\",\n\"markup\": \"Hi\"\n}</textbox></svg>"
/// );
/// # Ok::<(), svgtextbox::Error>(())
/// ```
pub fn serialize(doc: &Document, options: &TransformOptions) -> Result<Document> {
    // Nested textboxes flatten into their outer record's text
    let index = TextboxIndex::outermost(doc, options);
    debug!("Serializing {} textboxes to records", index.len());
    copy_with(doc, &mut RecordWriter { options, index })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::common::normalize_space;
    use crate::record::ParsedRecord;
    use crate::common::xml::{escape_attribute, escape_text};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_record_reproduces_attributes_and_normalized_markup(
            values in prop::collection::vec(
                prop_oneof![
                    "-?[0-9]{1,3}(\\.[0-9]{0,2})?",
                    "(true|false|null)",
                    "[ \ta-z0-9.&<>\"'-]{0,8}",
                ],
                0..5,
            ),
            text in "[ \t\na-z&<]{0,16}",
        ) {
            let attributes: String = values
                .iter()
                .enumerate()
                .map(|(i, v)| format!(" a{}=\"{}\"", i, escape_attribute(v)))
                .collect();
            let xml = format!("<textbox{}><markup>{}</markup></textbox>", attributes, escape_text(&text));
            let doc = Document::parse(&xml).unwrap();
            let out = serialize(&doc, &TransformOptions::default()).unwrap();
            let record = ParsedRecord::parse(&out.text_content(out.root_element().unwrap())).unwrap();

            let expected: Vec<(String, String)> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("a{}", i), v.clone()))
                .collect();
            prop_assert_eq!(record.attributes, expected);
            prop_assert_eq!(record.markup, normalize_space(&text));
        }
    }
}
