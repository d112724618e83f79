//! Out-of-band directives attached to a document.
//!
//! Directives travel as processing instructions (`<?svgtextbox-prefix tb3?>`)
//! anywhere in the document. They are collected once, before a pass runs,
//! and handed to the pass as explicit [`FragmentParams`].

use std::collections::HashMap;

use log::debug;

use crate::common::number::coerce;
use crate::common::{Error, Result, trim_xml};
use crate::config::DirectiveNames;
use crate::tree::Document;

/// Processing-instruction values of one document, keyed by target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    values: HashMap<String, String>,
}

impl Directives {
    /// Collect every processing instruction of `doc` in a single pre-order
    /// scan. The first occurrence of a target wins and values are trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::directive::Directives;
    /// use svgtextbox::tree::Document;
    ///
    /// let doc = Document::parse("<?p  one ?><svg><?p two?></svg>")?;
    /// let directives = Directives::from_document(&doc);
    /// assert_eq!(directives.get("p"), Some("one"));
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn from_document(doc: &Document) -> Self {
        let mut values = HashMap::new();
        for id in doc.iter() {
            if let Some(pi) = doc.node(id).as_processing_instruction() {
                values
                    .entry(pi.target.clone())
                    .or_insert_with(|| trim_xml(&pi.data).to_string());
            }
        }
        Self { values }
    }

    /// Value of the directive named `target`.
    #[inline]
    pub fn get(&self, target: &str) -> Option<&str> {
        self.values.get(target).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pick the fragment parameters out of the collected directives.
    pub fn fragment_params(&self, names: &DirectiveNames) -> FragmentParams {
        let params = FragmentParams {
            prefix: self.get(&names.prefix).map(str::to_string),
            x_offset: self.get(&names.x_offset).map(str::to_string),
            y_offset: self.get(&names.y_offset).map(str::to_string),
        };
        debug!(
            "Resolved fragment directives: prefix={:?} x_offset={:?} y_offset={:?}",
            params.prefix, params.x_offset, params.y_offset
        );
        params
    }
}

/// Parameters of the fragment namespacer.
///
/// Values are kept as supplied; missing or malformed values only become
/// errors once a rewrite rule actually needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentParams {
    pub prefix: Option<String>,
    pub x_offset: Option<String>,
    pub y_offset: Option<String>,
}

impl FragmentParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve parameters from the document's own directives.
    pub fn from_document(doc: &Document, names: &DirectiveNames) -> Self {
        Directives::from_document(doc).fragment_params(names)
    }

    #[inline]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[inline]
    pub fn with_offsets(mut self, x_offset: impl Into<String>, y_offset: impl Into<String>) -> Self {
        self.x_offset = Some(x_offset.into());
        self.y_offset = Some(y_offset.into());
        self
    }

    /// The prefix, trimmed.
    pub fn prefix(&self, names: &DirectiveNames) -> Result<&str> {
        self.prefix
            .as_deref()
            .map(trim_xml)
            .ok_or_else(|| Error::missing_directive(&names.prefix))
    }

    /// Both offsets coerced to numbers.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::config::DirectiveNames;
    /// use svgtextbox::directive::FragmentParams;
    ///
    /// let params = FragmentParams::new().with_offsets("10", " 20 ");
    /// assert_eq!(params.offsets(&DirectiveNames::default())?, (10.0, 20.0));
    /// # Ok::<(), svgtextbox::Error>(())
    /// ```
    pub fn offsets(&self, names: &DirectiveNames) -> Result<(f64, f64)> {
        let x = resolve_offset(&names.x_offset, self.x_offset.as_deref())?;
        let y = resolve_offset(&names.y_offset, self.y_offset.as_deref())?;
        Ok((x, y))
    }
}

fn resolve_offset(directive: &str, value: Option<&str>) -> Result<f64> {
    let value = value.ok_or_else(|| Error::missing_directive(directive))?;
    coerce(value).ok_or_else(|| Error::invalid_number(directive, value))
}
