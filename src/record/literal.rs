//! Typed literals for record values.

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::common::number::is_decimal;
use crate::common::whitespace::is_normalized;

/// A record value with its inferred JSON type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Quoted string
    String(String),
    /// Numeric literal, kept as its source text
    Number(String),
    Bool(bool),
    Null,
}

impl Literal {
    /// Infer the literal type of an attribute value.
    ///
    /// `true`, `false` and `null` always stay bare. Any other value is
    /// quoted when one of these holds, checked in order:
    ///
    /// 1. whitespace normalization would change it,
    /// 2. it is not a decimal number,
    /// 3. it ends with `.`,
    /// 4. it has a leading zero followed by more digits,
    /// 5. it starts with `.` or `-.` (no integer part).
    ///
    /// Everything left is a number written exactly as given.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgtextbox::record::Literal;
    ///
    /// assert_eq!(Literal::infer("5"), Literal::Number("5".into()));
    /// assert_eq!(Literal::infer("0"), Literal::Number("0".into()));
    /// assert_eq!(Literal::infer("007"), Literal::String("007".into()));
    /// assert_eq!(Literal::infer("3."), Literal::String("3.".into()));
    /// assert_eq!(Literal::infer("  5"), Literal::String("  5".into()));
    /// assert_eq!(Literal::infer("true"), Literal::Bool(true));
    /// assert_eq!(Literal::infer("null"), Literal::Null);
    /// ```
    pub fn infer(value: &str) -> Self {
        match value {
            "true" => return Literal::Bool(true),
            "false" => return Literal::Bool(false),
            "null" => return Literal::Null,
            _ => {},
        }

        if !is_normalized(value)
            || !is_decimal(value)
            || value.ends_with('.')
            || has_leading_zero(value)
            || value.starts_with('.')
            || value.starts_with("-.")
        {
            Literal::String(value.to_string())
        } else {
            Literal::Number(value.to_string())
        }
    }

    /// Whether the literal is written as a quoted string.
    #[inline]
    pub fn is_quoted(&self) -> bool {
        matches!(self, Literal::String(_))
    }

    /// The value the literal was inferred from.
    pub fn source_text(&self) -> &str {
        match self {
            Literal::String(s) | Literal::Number(s) => s,
            Literal::Bool(true) => "true",
            Literal::Bool(false) => "false",
            Literal::Null => "null",
        }
    }
}

/// `0` followed by another digit, after an optional minus sign
fn has_leading_zero(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value).as_bytes();
    digits.len() > 1 && digits[0] == b'0' && digits[1].is_ascii_digit()
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Literal::String(s) => serializer.serialize_str(s),
            Literal::Number(raw) => RawValue::from_string(raw.clone())
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Literal::Bool(b) => serializer.serialize_bool(*b),
            Literal::Null => serializer.serialize_unit(),
        }
    }
}
