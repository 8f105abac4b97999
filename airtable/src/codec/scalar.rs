use serde_json::Value;

use super::{FieldCodec, FieldKind};
use crate::error::CodecError;

/// A star rating.
///
/// The API is the source of truth for the configured maximum, so any value
/// that fits is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(pub u8);

impl FieldCodec for Rating {
    const KIND: FieldKind = FieldKind::Rating;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let n = value
            .as_u64()
            .ok_or_else(|| CodecError::unexpected("non-negative integer", value))?;
        u8::try_from(n)
            .map(Self)
            .map_err(|_| CodecError::OutOfRange {
                value: n.to_string(),
                target: "u8",
            })
    }

    fn encode(&self) -> Option<Value> {
        Some(Value::from(self.0))
    }
}

/// A checkbox. Unchecked boxes are omitted by the API and decode to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Checkbox(pub bool);

impl FieldCodec for Checkbox {
    const KIND: FieldKind = FieldKind::Checkbox;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        value
            .as_bool()
            .map(Self)
            .ok_or_else(|| CodecError::unexpected("boolean", value))
    }

    fn encode(&self) -> Option<Value> {
        Some(Value::Bool(self.0))
    }
}

impl From<Checkbox> for bool {
    fn from(checkbox: Checkbox) -> Self {
        checkbox.0
    }
}
