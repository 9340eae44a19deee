//! Error types for parsing, serializing and accessing JSON values.

use thiserror::Error;

/// Errors that can occur while parsing, serializing or querying a [`Json`](crate::Json).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    /// The input text was not valid JSON.
    /// `line` and `column` are 1-based and point at the offending character.
    #[error("JSON parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// An accessor was called on a value whose active variant does not support it.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Read access past the end of an array.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Read-only keyed access to a key the object does not hold.
    #[error("missing key: {0:?}")]
    MissingKey(String),

    /// The value cannot be rendered as JSON text.
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl JsonError {
    /// Returns true for grammar failures reported by the parser.
    pub fn is_parse(&self) -> bool {
        matches!(self, JsonError::Parse { .. })
    }
}

/// Convenience alias used throughout cjson-core.
pub type Result<T> = std::result::Result<T, JsonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = JsonError::Parse {
            line: 2,
            column: 5,
            message: "expected ':'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "JSON parse error at line 2, column 5: expected ':'"
        );
        assert!(err.is_parse());

        let err = JsonError::TypeMismatch {
            expected: "integer",
            found: "string",
        };
        assert_eq!(err.to_string(), "type mismatch: expected integer, found string");
        assert!(!err.is_parse());

        let err = JsonError::IndexOutOfBounds { index: 3, len: 1 };
        assert_eq!(err.to_string(), "index 3 out of bounds for array of length 1");

        let err = JsonError::MissingKey("on".to_string());
        assert_eq!(err.to_string(), "missing key: \"on\"");
    }
}
