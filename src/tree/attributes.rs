//! Ordered attribute storage.
//!
//! Keys are unique and keep their insertion order so that copied elements
//! serialize their attributes exactly as they were read.

use crate::tree::qname::QualifiedName;
use smallvec::SmallVec;

/// A single attribute with its qualified name and unescaped value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub value: String,
}

impl Attribute {
    /// Create an attribute with an unresolved name.
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualifiedName::new(name),
            value: value.into(),
        }
    }
}

/// Ordered attribute mapping of an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: SmallVec<[Attribute; 4]>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in document order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.items.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attribute> {
        self.items.iter_mut()
    }

    /// Position of the attribute with the given qualified name.
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|attr| attr.name.qualified_name == name)
    }

    /// Get an attribute value by qualified name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.items[i].value.as_str())
    }

    /// Whether an attribute with the given qualified name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Add an attribute, replacing the value in place if the name exists.
    pub fn push(&mut self, attribute: Attribute) {
        match self.position(&attribute.name.qualified_name) {
            Some(i) => self.items[i].value = attribute.value,
            None => self.items.push(attribute),
        }
    }

    /// Set an attribute value, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.push(Attribute::new(name, value));
    }

    /// Place `attribute` directly after `anchor`, removing any existing
    /// attribute of the same name first. Appends when `anchor` is absent.
    pub fn insert_after(&mut self, anchor: &str, attribute: Attribute) {
        self.remove(&attribute.name.qualified_name);
        match self.position(anchor) {
            Some(i) => self.items.insert(i + 1, attribute),
            None => self.items.push(attribute),
        }
    }

    /// Remove an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.items.remove(i).value)
    }

    /// Namespace declaration attributes (`xmlns`, `xmlns:*`).
    pub fn namespace_declarations(&self) -> impl Iterator<Item = &Attribute> {
        self.items
            .iter()
            .filter(|attr| attr.name.is_namespace_declaration())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for attr in iter {
            attrs.push(attr);
        }
        attrs
    }
}
