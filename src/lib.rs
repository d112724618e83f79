//! svgtextbox - Tree rewriting passes for SVG documents with textbox regions
//!
//! This library turns an SVG-like document whose text lives in `textbox`
//! elements into the representations a textbox renderer consumes.
//!
//! # Features
//!
//! - **Identity annotation**: Tag every textbox with a document-order id (`textbox-0`, `textbox-1`, ...)
//! - **Record serialization**: Replace every textbox by a JSON record of its attributes and normalized text
//! - **Fragment namespacing**: Prefix a reusable fragment's ids and references and translate positioned elements
//! - **Directive channel**: Read prefixes and offsets from processing instructions carried by the document
//! - **Configurable vocabulary**: Element, attribute and key names loadable from YAML
//!
//! # Example - Annotating textboxes
//!
//! ```
//! use svgtextbox::{TransformOptions, annotate_str};
//!
//! let svg = r#"<svg><textbox x="5"><markup>  Hello <br/> World </markup></textbox></svg>"#;
//! let out = annotate_str(svg, &TransformOptions::default())?;
//! assert_eq!(
//!     out,
//!     "<svg><textbox __id=\"textbox-0\" x=\"5\"><markup>Hello\nWorld</markup></textbox></svg>"
//! );
//! # Ok::<(), svgtextbox::Error>(())
//! ```
//!
//! # Example - Reading records back
//!
//! ```
//! use svgtextbox::record::ParsedRecord;
//! use svgtextbox::transform::serialize;
//! use svgtextbox::{Document, TransformOptions};
//!
//! let doc = Document::parse(r#"<svg><textbox width="200" code="007"><markup>Hi</markup></textbox></svg>"#)?;
//! let out = serialize(&doc, &TransformOptions::default())?;
//!
//! let textbox = out.node(out.root_element().unwrap()).children()[0];
//! let record = ParsedRecord::parse(&out.text_content(textbox))?;
//! assert_eq!(record.id, "textbox-0");
//! assert_eq!(record.attribute("code"), Some("007"));
//! assert_eq!(record.markup, "Hi");
//! # Ok::<(), svgtextbox::Error>(())
//! ```
//!
//! # Example - Namespacing a fragment
//!
//! ```
//! use svgtextbox::{FragmentParams, TransformOptions, namespace_str};
//!
//! let fragment = r##"<svg><symbol id="icon1"/><use href="#Xicon1" x="0"/></svg>"##;
//! let params = FragmentParams::new().with_prefix("p1").with_offsets("10", "20");
//! let out = namespace_str(fragment, &TransformOptions::default(), Some(&params))?;
//! assert_eq!(
//!     out,
//!     r##"<svg><symbol id="p1-icon1"/><use href="#p1-icon1" x="0" transform="translate(10,20)"/></svg>"##
//! );
//! # Ok::<(), svgtextbox::Error>(())
//! ```

/// Errors, XML escaping, whitespace and number handling
pub mod common;

/// Transform options
pub mod config;

/// Processing-instruction directives and fragment parameters
pub mod directive;

/// Markup content classification, rendering and text extraction
pub mod markup;

/// JSON records of textboxes
pub mod record;

/// The transform passes
///
/// Each pass copies its input document, overriding only the nodes its rules
/// match.
pub mod transform;

/// Arena document tree with a quick-xml reader and writer
pub mod tree;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::{MarkupMode, TransformOptions};
pub use directive::{Directives, FragmentParams};
pub use record::{Literal, ParsedRecord, Record};
pub use transform::{Pass, annotate, annotate_str, namespace, namespace_str, run, serialize, serialize_str};
pub use tree::Document;
