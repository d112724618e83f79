//! Qualified names and namespace scoping.
//!
//! Element and attribute names keep the prefix they were written with so the
//! passes can copy them verbatim; the resolved namespace URI is kept next to
//! it for namespace-aware matching.

/// SVG namespace
pub const SVGNS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace
pub const XLINKNS: &str = "http://www.w3.org/1999/xlink";

/// XML namespace (bound to the `xml` prefix without a declaration)
pub const XMLNS: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace of `xmlns` declarations themselves
pub const XMLNSNS: &str = "http://www.w3.org/2000/xmlns/";

/// Qualified name with namespace support
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Namespace URI, if the name is in a namespace
    pub namespace_uri: Option<String>,
    /// Local name (without prefix)
    pub local_name: String,
    /// Full qualified name (with prefix if present)
    pub qualified_name: String,
}

impl QualifiedName {
    /// Parse a name as written, without resolving its prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::tree::QualifiedName;
    ///
    /// let name = QualifiedName::new("xlink:href");
    /// assert_eq!(name.prefix(), Some("xlink"));
    /// assert_eq!(name.local_name, "href");
    /// assert_eq!(name.namespace_uri, None);
    /// ```
    pub fn new(name: &str) -> Self {
        let local_name = match name.split_once(':') {
            Some((_, local)) => local,
            None => name,
        };
        Self {
            namespace_uri: None,
            local_name: local_name.to_string(),
            qualified_name: name.to_string(),
        }
    }

    /// Parse a name and attach an already resolved namespace URI.
    pub fn with_namespace(name: &str, namespace_uri: Option<&str>) -> Self {
        let mut qname = Self::new(name);
        qname.namespace_uri = namespace_uri.map(str::to_string);
        qname
    }

    /// The prefix the name was written with.
    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.qualified_name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Whether this is an `xmlns` or `xmlns:*` declaration attribute.
    #[inline]
    pub fn is_namespace_declaration(&self) -> bool {
        self.qualified_name == "xmlns" || self.prefix() == Some("xmlns")
    }

    /// Match on local name and, when given, on namespace URI.
    ///
    /// A `None` namespace matches the local name in any namespace.
    #[inline]
    pub fn matches(&self, local_name: &str, namespace_uri: Option<&str>) -> bool {
        self.local_name == local_name
            && namespace_uri.is_none_or(|uri| self.namespace_uri.as_deref() == Some(uri))
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified_name)
    }
}

/// Namespace declarations introduced by one element
#[derive(Debug, Clone, Default)]
struct Scope {
    /// `Some(None)` records `xmlns=""`, which undeclares the default namespace
    default_namespace: Option<Option<String>>,
    prefixes: Vec<(String, String)>,
}

/// Stack of in-scope namespace declarations for resolving prefixes to URIs
#[derive(Debug, Clone, Default)]
pub struct NamespaceContext {
    scopes: Vec<Scope>,
}

impl NamespaceContext {
    /// Open a scope holding the declarations among `declarations`
    /// (`(attribute name, value)` pairs; non-declarations are ignored).
    pub fn push_scope<'a>(&mut self, declarations: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let mut scope = Scope::default();
        for (name, uri) in declarations {
            if name == "xmlns" {
                scope.default_namespace = Some((!uri.is_empty()).then(|| uri.to_string()));
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                scope.prefixes.push((prefix.to_string(), uri.to_string()));
            }
        }
        self.scopes.push(scope);
    }

    /// Close the innermost scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Resolve a prefix (or the default namespace for `None`) to a URI.
    pub fn resolve(&self, prefix: Option<&str>) -> Option<&str> {
        match prefix {
            Some("xml") => Some(XMLNS),
            Some("xmlns") => Some(XMLNSNS),
            Some(prefix) => self.scopes.iter().rev().find_map(|scope| {
                scope
                    .prefixes
                    .iter()
                    .find(|(p, _)| p == prefix)
                    .map(|(_, uri)| uri.as_str())
            }),
            None => self
                .scopes
                .iter()
                .rev()
                .find_map(|scope| scope.default_namespace.as_ref())
                .and_then(|uri| uri.as_deref()),
        }
    }

    /// Resolve an element name; unprefixed element names take the default namespace.
    pub fn element_name(&self, name: &str) -> QualifiedName {
        let mut qname = QualifiedName::new(name);
        qname.namespace_uri = self.resolve(qname.prefix()).map(str::to_string);
        qname
    }

    /// Resolve an attribute name; unprefixed attributes are in no namespace.
    pub fn attribute_name(&self, name: &str) -> QualifiedName {
        let mut qname = QualifiedName::new(name);
        qname.namespace_uri = match qname.prefix() {
            Some(prefix) => self.resolve(Some(prefix)).map(str::to_string),
            None if name == "xmlns" => Some(XMLNSNS.to_string()),
            None => None,
        };
        qname
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace_resolution() {
        let mut ctx = NamespaceContext::default();
        ctx.push_scope([("xmlns", SVGNS), ("xmlns:xlink", XLINKNS)]);

        let svg = ctx.element_name("textbox");
        assert_eq!(svg.namespace_uri.as_deref(), Some(SVGNS));
        assert!(svg.matches("textbox", Some(SVGNS)));
        assert!(svg.matches("textbox", None));
        assert!(!svg.matches("textbox", Some(XLINKNS)));

        let href = ctx.attribute_name("xlink:href");
        assert_eq!(href.namespace_uri.as_deref(), Some(XLINKNS));
        assert_eq!(ctx.attribute_name("x").namespace_uri, None);
    }

    #[test]
    fn test_inner_scope_shadows_and_undeclares() {
        let mut ctx = NamespaceContext::default();
        ctx.push_scope([("xmlns", SVGNS)]);
        ctx.push_scope([("xmlns", "")]);
        assert_eq!(ctx.resolve(None), None);
        ctx.pop_scope();
        assert_eq!(ctx.resolve(None), Some(SVGNS));
    }

    #[test]
    fn test_reserved_prefixes() {
        let ctx = NamespaceContext::default();
        assert_eq!(ctx.resolve(Some("xml")), Some(XMLNS));
        assert_eq!(ctx.resolve(Some("unbound")), None);
        assert!(QualifiedName::new("xmlns:xlink").is_namespace_declaration());
        assert!(QualifiedName::new("xmlns").is_namespace_declaration());
        assert!(!QualifiedName::new("xlink:href").is_namespace_declaration());
    }
}
