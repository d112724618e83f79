//! Structured records: the JSON form of one textbox.
//!
//! A record holds the textbox identifier first, then every attribute with
//! its inferred literal type in source order, then the markup text. It is
//! written one entry per line:
//!
//! ```text
//! {
//! "__id": "textbox-0",
//! "x": 10,
//! "markup": "Hello"
//! }
//! ```

pub mod literal;
pub mod reader;

pub use literal::Literal;
pub use reader::ParsedRecord;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::common::Result;

/// Record builder for one textbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id_key: String,
    id: String,
    entries: Vec<(String, Literal)>,
    markup_key: String,
    markup: String,
}

impl Record {
    /// Start a record with the default `__id` and `markup` keys.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_keys("__id", id, "markup")
    }

    /// Start a record with custom identifier and markup keys.
    pub fn with_keys(id_key: impl Into<String>, id: impl Into<String>, markup_key: impl Into<String>) -> Self {
        Self {
            id_key: id_key.into(),
            id: id.into(),
            entries: Vec::new(),
            markup_key: markup_key.into(),
            markup: String::new(),
        }
    }

    /// Add an attribute, inferring its literal type.
    ///
    /// Names are not checked against the identifier and markup keys.
    pub fn push_attribute(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), Literal::infer(value)));
    }

    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.markup = markup.into();
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attribute entries in source order.
    #[inline]
    pub fn entries(&self) -> &[(String, Literal)] {
        &self.entries
    }

    #[inline]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Write the record as JSON text, one entry per line.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::record::Record;
    ///
    /// let mut record = Record::new("textbox-0");
    /// record.push_attribute("x", "10");
    /// record.push_attribute("style", "007");
    /// record.set_markup("Hi\nthere");
    /// assert_eq!(
    ///     record.to_json()?,
    ///     "{\n\"__id\": \"textbox-0\",\n\"x\": 10,\n\"style\": \"007\",\n\"markup\": \"Hi\\nthere\"\n}"
    /// );
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::with_capacity(64 + self.markup.len() + self.entries.len() * 24);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b""));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 2))?;
        map.serialize_entry(&self.id_key, &self.id)?;
        for (name, literal) in &self.entries {
            map.serialize_entry(name, literal)?;
        }
        map.serialize_entry(&self.markup_key, &self.markup)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_layout() {
        let mut record = Record::new("textbox-1");
        record.push_attribute("width", "200");
        record.push_attribute("wrap", "true");
        record.push_attribute("font", "Sans 10");
        record.set_markup("Hello");
        assert_eq!(
            record.to_json().unwrap(),
            concat!(
                "{\n",
                "\"__id\": \"textbox-1\",\n",
                "\"width\": 200,\n",
                "\"wrap\": true,\n",
                "\"font\": \"Sans 10\",\n",
                "\"markup\": \"Hello\"\n",
                "}"
            )
        );
    }

    #[test]
    fn test_to_json_without_attributes() {
        let record = Record::with_keys("id", "b0", "text");
        assert_eq!(record.to_json().unwrap(), "{\n\"id\": \"b0\",\n\"text\": \"\"\n}");
    }

    #[test]
    fn test_escaping() {
        let mut record = Record::new("textbox-0");
        record.push_attribute("title", "say \"hi\"\\");
        record.set_markup("tab\there ⁂");
        let parsed = ParsedRecord::parse(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed.attribute("title"), Some("say \"hi\"\\"));
        assert_eq!(parsed.markup, "tab\there ⁂");
    }
}
