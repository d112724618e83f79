//! XML whitespace handling.
//!
//! XML recognises exactly four whitespace characters: space, tab, carriage
//! return and line feed. Unicode spaces such as U+00A0 are content.

/// Check whether a character is XML whitespace.
#[inline]
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Trim leading and trailing XML whitespace.
#[inline]
pub fn trim_xml(s: &str) -> &str {
    s.trim_matches(is_xml_whitespace)
}

/// Collapse runs of XML whitespace into a single space and trim both ends.
///
/// Equivalent to XPath `normalize-space()`. Normalizing an already
/// normalized string returns it unchanged.
///
/// # Examples
///
/// ```
/// use svgtextbox::common::normalize_space;
/// assert_eq!(normalize_space("\n   Hello \t World\n"), "Hello World");
/// assert_eq!(normalize_space("   "), "");
/// ```
pub fn normalize_space(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(is_xml_whitespace).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Check whether `s` is already in normalized form.
#[inline]
pub fn is_normalized(s: &str) -> bool {
    normalize_space(s) == s
}
