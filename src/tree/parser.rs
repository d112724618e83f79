//! Building a [`Document`] from XML text.
//!
//! The tree is built from the quick-xml event stream in a single pass. Text
//! and entity references are unescaped, adjacent character data is merged
//! into one text node, and namespace prefixes are resolved against the
//! declarations in scope.

use crate::common::{Error, Result};
use crate::tree::attributes::{Attribute, Attributes};
use crate::tree::document::Document;
use crate::tree::node::{Element, NodeId, NodeKind, ProcessingInstruction};
use crate::tree::qname::NamespaceContext;
use log::trace;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::str;

/// Incremental tree construction state
#[derive(Default)]
struct TreeBuilder {
    doc: Document,
    open: Vec<NodeId>,
    namespaces: NamespaceContext,
}

impl TreeBuilder {
    #[inline]
    fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    fn open_element(&mut self, start: &BytesStart<'_>) -> Result<NodeId> {
        let name = str::from_utf8(start.name().as_ref())?.to_string();

        let mut raw = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            raw.push((key, value));
        }

        self.namespaces
            .push_scope(raw.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let attributes: Attributes = raw
            .iter()
            .map(|(key, value)| Attribute {
                name: self.namespaces.attribute_name(key),
                value: value.clone(),
            })
            .collect();

        let element = Element {
            name: self.namespaces.element_name(&name),
            attributes,
        };
        let id = self.doc.append(self.current(), NodeKind::Element(element));
        self.open.push(id);
        Ok(id)
    }

    fn close_element(&mut self) -> Result<()> {
        self.open
            .pop()
            .ok_or_else(|| Error::Xml("Unexpected end tag".to_string()))?;
        self.namespaces.pop_scope();
        Ok(())
    }

    fn append(&mut self, kind: NodeKind) {
        self.doc.append(self.current(), kind);
    }

    fn text(&mut self, text: &str) {
        self.doc.append_text(self.current(), text);
    }

    fn finish(self) -> Result<Document> {
        if let Some(&unclosed) = self.open.last() {
            let name = self
                .doc
                .element(unclosed)
                .map(|e| e.name.qualified_name.clone())
                .unwrap_or_default();
            return Err(Error::Xml(format!("Unclosed element <{}>", name)));
        }
        if self.doc.root_element().is_none() {
            return Err(Error::InvalidFormat(
                "Document has no root element".to_string(),
            ));
        }
        Ok(self.doc)
    }
}

impl Document {
    /// Parse a document from XML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::tree::Document;
    ///
    /// let doc = Document::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"/></svg>"#)?;
    /// let root = doc.root_element().unwrap();
    /// assert_eq!(doc.element(root).unwrap().local_name(), "svg");
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] for malformed XML or unknown entity references
    /// and [`Error::InvalidFormat`] when there is no root element.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut builder = TreeBuilder::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    builder.open_element(e)?;
                },
                Event::Empty(ref e) => {
                    builder.open_element(e)?;
                    builder.close_element()?;
                },
                Event::End(_) => builder.close_element()?,
                // References arrive as separate events, text is already plain
                Event::Text(ref t) => builder.text(str::from_utf8(t)?),
                Event::GeneralRef(ref r) => match r.resolve_char_ref()? {
                    Some(c) => builder.text(c.encode_utf8(&mut [0; 4])),
                    None => {
                        let name = str::from_utf8(r)?;
                        let text = resolve_predefined_entity(name).ok_or_else(|| {
                            Error::Xml(format!("Unknown entity reference: &{};", name))
                        })?;
                        builder.text(text);
                    },
                },
                Event::CData(ref c) => {
                    builder.append(NodeKind::CData(str::from_utf8(c)?.to_string()));
                },
                Event::Comment(ref c) => {
                    builder.append(NodeKind::Comment(str::from_utf8(c)?.to_string()));
                },
                Event::PI(ref pi) => {
                    let pi = ProcessingInstruction::from_raw(str::from_utf8(pi)?);
                    builder.append(NodeKind::ProcessingInstruction(pi));
                },
                Event::Decl(ref d) => {
                    builder.append(NodeKind::Declaration(str::from_utf8(d)?.to_string()));
                },
                Event::DocType(ref d) => {
                    builder.append(NodeKind::DocType(str::from_utf8(d)?.trim().to_string()));
                },
                Event::Eof => break,
            }
            buf.clear();
        }

        let doc = builder.finish()?;
        trace!("Parsed document with {} nodes", doc.len());
        Ok(doc)
    }

    /// Parse a document from UTF-8 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(str::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::qname::{SVGNS, XLINKNS};

    #[test]
    fn test_parse_prolog_and_root() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- c --><svg/>";
        let doc = Document::parse(xml).expect("Failed to parse");
        let kinds: Vec<&NodeKind> = doc.roots().iter().map(|&id| doc.node(id).kind()).collect();
        assert!(matches!(kinds[0], NodeKind::Declaration(d) if d == "xml version=\"1.0\""));
        assert!(matches!(kinds[1], NodeKind::Text(t) if t == "\n"));
        assert!(matches!(kinds[2], NodeKind::Comment(c) if c == " c "));
        assert!(matches!(kinds[3], NodeKind::Element(_)));
    }

    #[test]
    fn test_parse_resolves_references_into_single_text_node() {
        let doc = Document::parse("<p>Trouble &amp; Strife &#x2042;</p>").expect("Failed to parse");
        let root = doc.root_element().unwrap();
        assert_eq!(doc.node(root).children().len(), 1);
        assert_eq!(doc.text_content(root), "Trouble & Strife ⁂");
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let doc = Document::parse(r#"<t a="x &amp; &lt;y&gt;&#9;&#x2042;" b='"q"'/>"#).expect("Failed to parse");
        let element = doc.element(doc.root_element().unwrap()).unwrap();
        assert_eq!(element.attribute("a"), Some("x & <y>\t⁂"));
        assert_eq!(element.attribute("b"), Some("\"q\""));
    }

    #[test]
    fn test_parse_attributes_in_order_with_namespaces() {
        let xml = format!(
            r##"<svg xmlns="{SVGNS}" xmlns:xlink="{XLINKNS}"><use xlink:href="#g1" x="1" y="2"/></svg>"##
        );
        let doc = Document::parse(&xml).expect("Failed to parse");
        let root = doc.root_element().unwrap();
        let use_id = doc.node(root).children()[0];
        let element = doc.element(use_id).unwrap();

        assert_eq!(element.name.namespace_uri.as_deref(), Some(SVGNS));
        let names: Vec<&str> = element
            .attributes
            .iter()
            .map(|a| a.name.qualified_name.as_str())
            .collect();
        assert_eq!(names, ["xlink:href", "x", "y"]);
        let href = element.attributes.iter().next().unwrap();
        assert_eq!(href.name.namespace_uri.as_deref(), Some(XLINKNS));
        assert_eq!(href.value, "#g1");
    }

    #[test]
    fn test_parse_processing_instruction() {
        let doc = Document::parse("<svg/><?svgtextbox-prefix tb-1?>").expect("Failed to parse");
        let pi = doc.node(doc.roots()[1]).as_processing_instruction().unwrap();
        assert_eq!(pi.target, "svgtextbox-prefix");
        assert_eq!(pi.data, "tb-1");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Document::parse("<a><b></a>"), Err(Error::Xml(_))));
        assert!(matches!(Document::parse("<a>"), Err(Error::Xml(_))));
        assert!(matches!(Document::parse("<a>&nbsp;</a>"), Err(Error::Xml(_))));
        assert!(matches!(Document::parse("<a b=\"&nbsp;\"/>"), Err(Error::Xml(_))));
        assert!(matches!(
            Document::parse("<!-- nothing -->"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        assert!(matches!(
            Document::from_bytes(&[b'<', 0xff, b'/', b'>']),
            Err(Error::InvalidFormat(_))
        ));
    }
}
