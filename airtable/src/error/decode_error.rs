//! Response decoding errors.

use thiserror::Error;

use crate::codec::FieldKind;

/// Errors turning a successful response body into native records.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not the expected record or page envelope.
    #[error("Malformed response envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// One column's value could not be converted by its codec.
    #[error(transparent)]
    Field(#[from] FieldDecodeError),
}

/// A single column failed to decode.
///
/// Decoding of the surrounding record (and page) stops at the first failure.
#[derive(Debug, Error)]
#[error("Failed to decode column `{column}` as {kind}: {source}")]
pub struct FieldDecodeError {
    /// The column name as it appears on the wire.
    pub column: String,
    /// The codec that rejected the value.
    pub kind: FieldKind,
    /// What the codec objected to.
    pub source: CodecError,
}

/// A codec rejected a JSON value.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The JSON value has the wrong shape for this field kind.
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    /// A date string is neither RFC 3339 nor `YYYY-MM-DD`.
    #[error("invalid date `{value}`: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    /// A number does not fit the native type.
    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },

    /// An attachment object is missing required sub-fields.
    #[error("invalid attachment: {0}")]
    Attachment(#[source] serde_json::Error),
}

impl CodecError {
    /// Shape mismatch against the name of the JSON type actually seen.
    pub fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        Self::UnexpectedShape {
            expected,
            found: json_type_name(found),
        }
    }
}

/// Human name of a JSON value's type, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unexpected_shape_display() {
        let err = CodecError::unexpected("string", &json!(42));
        assert_eq!(err.to_string(), "expected string, found number");
    }

    #[test]
    fn test_field_error_names_column() {
        let err = FieldDecodeError {
            column: "When?".to_string(),
            kind: FieldKind::Date,
            source: CodecError::unexpected("string", &json!([])),
        };
        assert_eq!(
            err.to_string(),
            "Failed to decode column `When?` as Date: expected string, found array"
        );
    }
}
