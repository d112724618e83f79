//! The three transform passes and their shared traversal.
//!
//! Every pass is a pure function from an input [`Document`] to a fresh
//! output document:
//!
//! - [`annotate`] tags each textbox with its document-order identifier,
//! - [`serialize`] replaces each textbox by a JSON record,
//! - [`namespace`] prefixes a fragment's ids and translates positioned
//!   elements.
//!
//! The passes are never composed; [`run`] applies the one a caller names.

pub mod annotate;
pub mod copy;
pub mod fragment;
pub mod index;
pub mod serialize;
pub mod shape;

pub use annotate::annotate;
pub use copy::{Rewrite, copy_with};
pub use fragment::namespace;
pub use index::TextboxIndex;
pub use serialize::serialize;
pub use shape::NodeShape;

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::common::{Error, Result};
use crate::config::TransformOptions;
use crate::directive::FragmentParams;
use crate::tree::Document;

/// A named transform pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Identity annotation
    Annotate,
    /// Record serialization
    Record,
    /// Fragment namespacing
    Fragment,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::Annotate, Pass::Record, Pass::Fragment];

    pub fn name(self) -> &'static str {
        match self {
            Pass::Annotate => "annotate",
            Pass::Record => "record",
            Pass::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pass::ALL
            .into_iter()
            .find(|pass| pass.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPass(s.to_string()))
    }
}

/// Run `pass` over `doc`.
///
/// `params` only matter to [`Pass::Fragment`]; when absent they are
/// resolved once from the document's own directives.
///
/// # Examples
///
/// ```
/// use svgtextbox::config::TransformOptions;
/// use svgtextbox::transform::{Pass, run};
/// use svgtextbox::tree::Document;
///
/// let doc = Document::parse(concat!(
///     "<?svgtextbox-prefix p1?><?svgtextbox-x_offset 1?><?svgtextbox-y_offset 2?>",
///     "<svg><symbol id=\"s\"/></svg>",
/// ))?;
/// let pass: Pass = "fragment".parse()?;
/// let out = run(pass, &doc, &TransformOptions::default(), None)?;
/// assert!(out.to_xml_string().ends_with("<svg><symbol id=\"p1-s\"/></svg>"));
/// # Ok::<(), svgtextbox::Error>(())
/// ```
pub fn run(
    pass: Pass,
    doc: &Document,
    options: &TransformOptions,
    params: Option<&FragmentParams>,
) -> Result<Document> {
    debug!("Running {} pass over {} nodes", pass, doc.len());
    let result = match pass {
        Pass::Annotate => Ok(annotate(doc, options)),
        Pass::Record => serialize(doc, options),
        Pass::Fragment => match params {
            Some(params) => namespace(doc, params, options),
            None => {
                let params = FragmentParams::from_document(doc, &options.directives);
                namespace(doc, &params, options)
            },
        },
    };
    if let Err(err) = &result
        && err.is_directive_error()
    {
        warn!("{} pass aborted: {}", pass, err);
    }
    result
}

/// Parse, annotate and write back.
pub fn annotate_str(xml: &str, options: &TransformOptions) -> Result<String> {
    Ok(annotate(&Document::parse(xml)?, options).to_xml_string())
}

/// Parse, serialize textboxes to records and write back.
pub fn serialize_str(xml: &str, options: &TransformOptions) -> Result<String> {
    Ok(serialize(&Document::parse(xml)?, options)?.to_xml_string())
}

/// Parse, namespace and write back. Parameters default to the document's
/// directives.
pub fn namespace_str(
    xml: &str,
    options: &TransformOptions,
    params: Option<&FragmentParams>,
) -> Result<String> {
    let doc = Document::parse(xml)?;
    Ok(run(Pass::Fragment, &doc, options, params)?.to_xml_string())
}
