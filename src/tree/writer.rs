//! Serializing a [`Document`] back to XML text.
//!
//! Output is written node by node with no reformatting; whitespace text
//! nodes are part of the tree and come back out exactly as read.

use crate::common::xml::{escape_attribute, escape_text};
use crate::tree::document::Document;
use crate::tree::node::{Element, NodeId, NodeKind};

impl Document {
    /// Serialize the whole document.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::tree::Document;
    ///
    /// let xml = r#"<svg width="10"><text>a &amp; b</text></svg>"#;
    /// let doc = Document::parse(xml)?;
    /// assert_eq!(doc.to_xml_string(), xml);
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(self.len() * 16);
        for &id in self.roots() {
            self.write_node(id, &mut out);
        }
        out
    }

    /// Serialize into bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml_string().into_bytes()
    }

    /// Serialize a node and its subtree into `out`.
    pub fn write_node(&self, id: NodeId, out: &mut String) {
        match self.node(id).kind() {
            NodeKind::Element(element) => {
                write_start_tag(element, out);
                if self.node(id).children().is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    self.write_children(id, out);
                    out.push_str("</");
                    out.push_str(&element.name.qualified_name);
                    out.push('>');
                }
            },
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::CData(data) => {
                out.push_str("<![CDATA[");
                out.push_str(data);
                out.push_str("]]>");
            },
            NodeKind::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            },
            NodeKind::ProcessingInstruction(pi) => {
                out.push_str("<?");
                out.push_str(&pi.target);
                if !pi.data.is_empty() {
                    out.push(' ');
                    out.push_str(&pi.data);
                }
                out.push_str("?>");
            },
            NodeKind::Declaration(decl) => {
                out.push_str("<?");
                out.push_str(decl);
                out.push_str("?>");
            },
            NodeKind::DocType(doctype) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(doctype);
                out.push('>');
            },
        }
    }

    /// Serialize only the children of `id` into `out`.
    pub fn write_children(&self, id: NodeId, out: &mut String) {
        for &child in self.node(id).children() {
            self.write_node(child, out);
        }
    }
}

fn write_start_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name.qualified_name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name.qualified_name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&attr.value));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_structure() {
        let xml = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n",
            "  <!-- shapes -->\n",
            "  <g id=\"surface1\"><rect x=\"0\" y=\"0\"/></g>\n",
            "  <style><![CDATA[rect { fill: red }]]></style>\n",
            "</svg>\n",
            "<?svgtextbox-prefix tb?>"
        );
        let doc = Document::parse(xml).expect("Failed to parse");
        assert_eq!(doc.to_xml_string(), xml);
    }

    #[test]
    fn test_attribute_values_survive_reparse() {
        let mut doc = Document::new();
        let mut element = Element::new("text");
        element.attributes.set("data", "a\"b'<c>&\n");
        doc.append(None, NodeKind::Element(element.clone()));

        let reparsed = Document::parse(&doc.to_xml_string()).expect("Failed to parse");
        let root = reparsed.root_element().unwrap();
        assert_eq!(
            reparsed.element(root).unwrap().attribute("data"),
            Some("a\"b'<c>&\n")
        );
    }

    #[test]
    fn test_write_children_only() {
        let doc = Document::parse("<markup>Hello<br/>World</markup>").expect("Failed to parse");
        let mut out = String::new();
        doc.write_children(doc.root_element().unwrap(), &mut out);
        assert_eq!(out, "Hello<br/>World");
    }
}
