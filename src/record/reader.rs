//! Reading serialized records back.
//!
//! Records are read with their entries in written order: the first entry is
//! the identifier, the last one the markup, everything between the
//! attributes. Attribute values come back as the exact text they were
//! inferred from.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;

use crate::common::{Error, Result};

/// A record read back from its JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub id_key: String,
    pub id: String,
    /// Attribute names and their original values, in record order
    pub attributes: Vec<(String, String)>,
    pub markup_key: String,
    pub markup: String,
}

impl ParsedRecord {
    /// Parse a record.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::record::ParsedRecord;
    ///
    /// let record = ParsedRecord::parse("{\n\"__id\": \"textbox-0\",\n\"x\": 007,\n\"markup\": \"Hi\"\n}");
    /// assert!(record.is_err());
    ///
    /// let record = ParsedRecord::parse("{\n\"__id\": \"textbox-0\",\n\"x\": 10,\n\"markup\": \"Hi\"\n}")?;
    /// assert_eq!(record.id, "textbox-0");
    /// assert_eq!(record.attribute("x"), Some("10"));
    /// assert_eq!(record.markup, "Hi");
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn parse(json: &str) -> Result<Self> {
        let Entries(mut entries) = serde_json::from_str(json)?;
        if entries.len() < 2 {
            return Err(Error::InvalidRecord(format!(
                "expected an identifier and a markup entry, found {} entries",
                entries.len()
            )));
        }

        let (markup_key, markup) = entries
            .pop()
            .ok_or_else(|| Error::InvalidRecord("record has no markup entry".to_string()))?;
        let mut entries = entries.into_iter();
        let (id_key, id) = entries
            .next()
            .ok_or_else(|| Error::InvalidRecord("record has no identifier entry".to_string()))?;

        let attributes = entries
            .map(|(key, value)| Ok((key, source_text(&value)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: expect_string(&id_key, &id)?,
            id_key,
            attributes,
            markup: expect_string(&markup_key, &markup)?,
            markup_key,
        })
    }

    /// Original value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Text an attribute value was written from: strings are unescaped, bare
/// literals are returned as written.
fn source_text(value: &RawValue) -> Result<String> {
    let raw = value.get();
    if raw.starts_with('"') {
        Ok(serde_json::from_str::<String>(raw)?)
    } else if raw.starts_with(['{', '[']) {
        Err(Error::InvalidRecord(format!("nested value {} in record", raw)))
    } else {
        Ok(raw.to_string())
    }
}

fn expect_string(key: &str, value: &RawValue) -> Result<String> {
    if !value.get().starts_with('"') {
        return Err(Error::InvalidRecord(format!(
            "{} must be a string, found {}",
            key,
            value.get()
        )));
    }
    Ok(serde_json::from_str::<String>(value.get())?)
}

/// Map entries in document order, duplicates kept
struct Entries(Vec<(String, Box<RawValue>)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a record object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Entries, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(8));
        while let Some(entry) = map.next_entry::<String, Box<RawValue>>()? {
            entries.push(entry);
        }
        Ok(Entries(entries))
    }
}
