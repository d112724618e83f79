//! Fragment namespacing: make a reusable fragment's ids unique per instance.
//!
//! Three attribute rules use the prefix directive:
//!
//! - `href` / `xlink:href` of the form `#Kname` becomes `#prefix-name`
//!   (the one-character kind tag `K` is dropped),
//! - `id` on `symbol` becomes `prefix-id`,
//! - `id` on `g` starting with `surface` becomes `prefix-surface`.
//!
//! Every element with an `x` attribute also gets
//! `transform="translate(x_offset,y_offset)"` right after `x`.

use log::{debug, trace};
use phf::phf_map;

use crate::common::number::write_number;
use crate::common::{Error, Result};
use crate::config::{DirectiveNames, TransformOptions};
use crate::directive::FragmentParams;
use crate::transform::copy::{Rewrite, copy_with};
use crate::tree::{Attribute, Document, Element};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdRole {
    Symbol,
    Group,
}

static ID_ROLES: phf::Map<&'static str, IdRole> = phf_map! {
    "symbol" => IdRole::Symbol,
    "g" => IdRole::Group,
};

struct Namespacer<'a> {
    params: &'a FragmentParams,
    names: &'a DirectiveNames,
    translate: Option<String>,
    rewrites: usize,
}

impl Namespacer<'_> {
    fn prefix(&self) -> Result<&str> {
        self.params.prefix(self.names)
    }

    /// `translate(x,y)`, resolved on first use.
    fn translate(&mut self) -> Result<&str> {
        if self.translate.is_none() {
            let (x, y) = self.params.offsets(self.names)?;
            let mut translate = String::with_capacity(24);
            translate.push_str("translate(");
            write_number(&mut translate, x);
            translate.push(',');
            write_number(&mut translate, y);
            translate.push(')');
            self.translate = Some(translate);
        }
        Ok(self.translate.as_deref().unwrap_or_default())
    }

    fn rewrite_value(&self, role: Option<IdRole>, attr: &Attribute) -> Result<Option<String>> {
        let value = attr.value.as_str();
        if attr.name.local_name == "href" {
            if let Some(token) = value.strip_prefix('#')
                && !token.is_empty()
            {
                let mut chars = token.chars();
                chars.next();
                return Ok(Some(format!("#{}-{}", self.prefix()?, chars.as_str())));
            }
            return Ok(None);
        }
        if attr.name.qualified_name != "id" {
            return Ok(None);
        }
        match role {
            Some(IdRole::Symbol) => Ok(Some(format!("{}-{}", self.prefix()?, value))),
            Some(IdRole::Group) if value.starts_with("surface") => {
                Ok(Some(format!("{}-surface", self.prefix()?)))
            },
            _ => Ok(None),
        }
    }
}

impl Rewrite for Namespacer<'_> {
    type Error = Error;

    fn rewrite_element(&mut self, element: &mut Element) -> Result<()> {
        let role = ID_ROLES.get(element.local_name()).copied();
        for attr in element.attributes.iter_mut() {
            if let Some(value) = self.rewrite_value(role, attr)? {
                trace!("{} {}: {:?} -> {:?}", element.name, attr.name, attr.value, value);
                attr.value = value;
                self.rewrites += 1;
            }
        }

        if element.attributes.contains("x") {
            let translate = Attribute::new("transform", self.translate()?);
            trace!("{}: transform={:?}", element.name, translate.value);
            element.attributes.insert_after("x", translate);
            self.rewrites += 1;
        }
        Ok(())
    }
}

/// Copy a fragment document, namespacing its ids and references with the
/// prefix and translating positioned elements by the offsets.
///
/// Fails with [`Error::MissingDirective`] or [`Error::InvalidNumber`] when a
/// rule needs a parameter that is absent or not numeric; no output is
/// produced in that case.
///
/// # Examples
///
/// ```
/// use svgtextbox::config::TransformOptions;
/// use svgtextbox::directive::FragmentParams;
/// use svgtextbox::transform::namespace;
/// use svgtextbox::tree::Document;
///
/// let doc = Document::parse(r##"<svg><use href="#Xabc" x="3"/></svg>"##)?;
/// let params = FragmentParams::new().with_prefix("p1").with_offsets("10", " 20 ");
/// let out = namespace(&doc, &params, &TransformOptions::default())?;
/// assert_eq!(
///     out.to_xml_string(),
///     r##"<svg><use href="#p1-abc" x="3" transform="translate(10,20)"/></svg>"##
/// );
/// # Ok::<(), svgtextbox::Error>(())
/// ```
pub fn namespace(doc: &Document, params: &FragmentParams, options: &TransformOptions) -> Result<Document> {
    let mut namespacer = Namespacer {
        params,
        names: &options.directives,
        translate: None,
        rewrites: 0,
    };
    let out = copy_with(doc, &mut namespacer)?;
    debug!("Namespaced fragment: {} attributes rewritten", namespacer.rewrites);
    Ok(out)
}
