//! Error types for frame decoding

use std::fmt;

use thiserror::Error;

use crate::FieldPath;

/// Kind of JSON value a field is expected to hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Whole number (ids, timestamps, type indices)
    Integer,
    /// Any number, read as single precision
    Number,
    Boolean,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// Frame decode errors
///
/// Any of these aborts the whole frame: no partial frame is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Missing field: {path}")]
    MissingField { path: FieldPath },

    #[error("Type mismatch at {path}: expected {expected}")]
    TypeMismatch { path: FieldPath, expected: ValueKind },

    #[error("Shape mismatch at {path}: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        path: FieldPath,
        expected: usize,
        actual: usize,
    },

    #[error("Degenerate basis at {path}")]
    DegenerateBasis { path: FieldPath },
}

impl DecodeError {
    /// Path of the field that failed
    pub fn path(&self) -> &FieldPath {
        match self {
            DecodeError::MissingField { path }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::ShapeMismatch { path, .. }
            | DecodeError::DegenerateBasis { path } => path,
        }
    }
}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_path() {
        let err = DecodeError::ShapeMismatch {
            path: FieldPath::root().key("pointables").index(2).key("bases"),
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch at pointables[2].bases: expected 4 elements, got 3"
        );

        let err = DecodeError::TypeMismatch {
            path: FieldPath::root().key("hands").index(0).key("type"),
            expected: ValueKind::String,
        };
        assert_eq!(err.to_string(), "Type mismatch at hands[0].type: expected string");
    }

    #[test]
    fn test_path_accessor() {
        let path = FieldPath::root().key("hands").index(1).key("palmPosition");
        let err = DecodeError::MissingField { path: path.clone() };
        assert_eq!(err.path(), &path);
    }
}
