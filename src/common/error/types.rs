//! Error types for svgtextbox operations.
//!
//! Only `MissingDirective` and `InvalidNumber` can come out of a transform
//! pass; the remaining variants belong to the surrounding adapters (parsing,
//! option loading, record read-back).
use thiserror::Error;

/// Main error type for svgtextbox operations.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Input is well-formed XML but not a usable document
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A rewrite rule needed a directive the document does not carry
    #[error("Missing directive: {directive}")]
    MissingDirective { directive: String },

    /// A directive value could not be coerced to a number
    #[error("Directive {directive} is not a number: {value:?}")]
    InvalidNumber { directive: String, value: String },

    /// A serialized record could not be read back
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Transform options could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Pass name not recognised
    #[error("Unknown pass: {0}")]
    UnknownPass(String),
}

impl Error {
    /// Build a [`Error::MissingDirective`] for the named directive.
    pub fn missing_directive(directive: &str) -> Self {
        Error::MissingDirective {
            directive: directive.to_string(),
        }
    }

    /// Build an [`Error::InvalidNumber`] for the named directive and raw value.
    pub fn invalid_number(directive: &str, value: &str) -> Self {
        Error::InvalidNumber {
            directive: directive.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether the error was raised by a directive-driven rewrite rule.
    pub fn is_directive_error(&self) -> bool {
        matches!(
            self,
            Error::MissingDirective { .. } | Error::InvalidNumber { .. }
        )
    }
}

/// Result type for svgtextbox operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_error_messages() {
        let err = Error::missing_directive("svgtextbox-prefix");
        assert_eq!(err.to_string(), "Missing directive: svgtextbox-prefix");
        assert!(err.is_directive_error());

        let err = Error::invalid_number("svgtextbox-x_offset", "ten");
        assert_eq!(
            err.to_string(),
            "Directive svgtextbox-x_offset is not a number: \"ten\""
        );
        assert!(err.is_directive_error());
    }

    #[test]
    fn test_other_errors_are_not_directive_errors() {
        assert!(!Error::Xml("bad".to_string()).is_directive_error());
        assert!(!Error::UnknownPass("x".to_string()).is_directive_error());
    }
}
