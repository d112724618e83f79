//! Configuration types for the transform passes.
//!
//! Every name a pass matches on or emits is carried here so callers embedding
//! textbox documents under other vocabularies can retarget the passes. The
//! defaults reproduce the renderer's own conventions.
//!
//! # Examples
//!
//! ```rust
//! use svgtextbox::config::{MarkupMode, TransformOptions};
//!
//! // Create with defaults
//! let options = TransformOptions::default();
//! assert_eq!(options.textbox_tag, "textbox");
//!
//! // Or customize
//! let options = TransformOptions::new()
//!     .with_id_prefix("box-")
//!     .with_markup_mode(MarkupMode::Pango);
//! ```
use std::collections::BTreeMap;

use serde::Deserialize;

/// Options shared by all three passes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Local name of textbox elements
    pub textbox_tag: String,
    /// Local name of the markup container inside a textbox
    pub markup_tag: String,
    /// Namespace textbox elements must be in; `None` matches any namespace
    pub textbox_namespace: Option<String>,
    /// Name of the synthetic identifier attribute
    pub id_attribute: String,
    /// Prefix of generated identifiers (`textbox-0`, `textbox-1`, ...)
    pub id_prefix: String,
    /// Record key holding the normalized markup text
    pub markup_key: String,
    /// How markup content is flattened into records
    pub markup_mode: MarkupMode,
    /// Divider marker rendering
    pub divider: DividerOptions,
    /// Processing-instruction targets carrying fragment directives
    pub directives: DirectiveNames,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            textbox_tag: "textbox".to_string(),
            markup_tag: "markup".to_string(),
            textbox_namespace: None,
            id_attribute: "__id".to_string(),
            id_prefix: "textbox-".to_string(),
            markup_key: "markup".to_string(),
            markup_mode: MarkupMode::default(),
            divider: DividerOptions::default(),
            directives: DirectiveNames::default(),
        }
    }
}

impl TransformOptions {
    /// Create a new `TransformOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the textbox element name.
    #[inline]
    pub fn with_textbox_tag(mut self, tag: impl Into<String>) -> Self {
        self.textbox_tag = tag.into();
        self
    }

    /// Set the markup container name.
    #[inline]
    pub fn with_markup_tag(mut self, tag: impl Into<String>) -> Self {
        self.markup_tag = tag.into();
        self
    }

    /// Restrict textbox matching to one namespace URI.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use svgtextbox::config::TransformOptions;
    /// use svgtextbox::tree::qname::SVGNS;
    ///
    /// let options = TransformOptions::new().with_textbox_namespace(SVGNS);
    /// assert_eq!(options.textbox_namespace.as_deref(), Some(SVGNS));
    /// ```
    #[inline]
    pub fn with_textbox_namespace(mut self, namespace_uri: impl Into<String>) -> Self {
        self.textbox_namespace = Some(namespace_uri.into());
        self
    }

    #[inline]
    pub fn with_id_attribute(mut self, name: impl Into<String>) -> Self {
        self.id_attribute = name.into();
        self
    }

    #[inline]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    #[inline]
    pub fn with_markup_key(mut self, key: impl Into<String>) -> Self {
        self.markup_key = key.into();
        self
    }

    /// Set how markup is flattened into records.
    #[inline]
    pub fn with_markup_mode(mut self, mode: MarkupMode) -> Self {
        self.markup_mode = mode;
        self
    }

    #[inline]
    pub fn with_divider(mut self, divider: DividerOptions) -> Self {
        self.divider = divider;
        self
    }

    #[inline]
    pub fn with_directives(mut self, directives: DirectiveNames) -> Self {
        self.directives = directives;
        self
    }

    /// Identifier assigned to the textbox at `index` in document order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use svgtextbox::config::TransformOptions;
    ///
    /// assert_eq!(TransformOptions::default().textbox_id(3), "textbox-3");
    /// ```
    pub fn textbox_id(&self, index: usize) -> String {
        let mut ints = itoa::Buffer::new();
        let digits = ints.format(index);
        let mut id = String::with_capacity(self.id_prefix.len() + digits.len());
        id.push_str(&self.id_prefix);
        id.push_str(digits);
        id
    }

    /// Load options from a YAML document; missing keys keep their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use svgtextbox::config::{MarkupMode, TransformOptions};
    ///
    /// let options = TransformOptions::from_yaml_str("markup_mode: pango\nid_prefix: tb-\n")?;
    /// assert_eq!(options.markup_mode, MarkupMode::Pango);
    /// assert_eq!(options.id_prefix, "tb-");
    /// assert_eq!(options.textbox_tag, "textbox");
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> crate::common::Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| {
            crate::common::Error::Config(format!("Failed to load transform options: {}", e))
        })
    }
}

/// How markup content is flattened into the record's markup value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    /// Plain text: inline formatting elements contribute only their text.
    #[default]
    Text,
    /// Pango markup: inline formatting elements are kept as markup text and
    /// dividers keep their styling span.
    Pango,
}

/// Divider marker rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DividerOptions {
    /// Separator glyph
    pub glyph: String,
    /// Attributes of the styling `span` wrapping the glyph
    pub attributes: BTreeMap<String, String>,
    /// Whether the glyph is part of the extracted plain text
    pub in_text: bool,
}

impl Default for DividerOptions {
    fn default() -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("size".to_string(), "larger".to_string());
        Self {
            glyph: "\u{2042}".to_string(),
            attributes,
            in_text: true,
        }
    }
}

/// Processing-instruction targets of the fragment directives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectiveNames {
    pub prefix: String,
    pub x_offset: String,
    pub y_offset: String,
}

impl Default for DirectiveNames {
    fn default() -> Self {
        Self {
            prefix: "svgtextbox-prefix".to_string(),
            x_offset: "svgtextbox-x_offset".to_string(),
            y_offset: "svgtextbox-y_offset".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TransformOptions::default();
        assert_eq!(options.markup_tag, "markup");
        assert_eq!(options.id_attribute, "__id");
        assert_eq!(options.markup_key, "markup");
        assert_eq!(options.markup_mode, MarkupMode::Text);
        assert_eq!(options.divider.glyph, "⁂");
        assert_eq!(
            options.divider.attributes.get("size").map(String::as_str),
            Some("larger")
        );
        assert!(options.divider.in_text);
        assert_eq!(options.directives.x_offset, "svgtextbox-x_offset");
    }

    #[test]
    fn test_builder() {
        let options = TransformOptions::new()
            .with_textbox_tag("box")
            .with_markup_tag("content")
            .with_id_attribute("data-id")
            .with_id_prefix("b")
            .with_markup_key("text");
        assert_eq!(options.textbox_tag, "box");
        assert_eq!(options.markup_tag, "content");
        assert_eq!(options.textbox_id(0), "b0");
        assert_eq!(options.textbox_id(12), "b12");
        assert_eq!(options.markup_key, "text");
        assert_eq!(options.id_attribute, "data-id");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_nested() {
        let yaml = "divider:\n  glyph: '*'\n  in_text: false\ndirectives:\n  prefix: pfx\n";
        let options = TransformOptions::from_yaml_str(yaml).unwrap();
        assert_eq!(options.divider.glyph, "*");
        assert!(!options.divider.in_text);
        // Unset nested fields fall back to their defaults
        assert_eq!(
            options.divider.attributes.get("size").map(String::as_str),
            Some("larger")
        );
        assert_eq!(options.directives.prefix, "pfx");
        assert_eq!(options.directives.y_offset, "svgtextbox-y_offset");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_rejects_bad_mode() {
        let err = TransformOptions::from_yaml_str("markup_mode: html\n").unwrap_err();
        assert!(matches!(err, crate::common::Error::Config(_)));
    }
}
