use serde_json::Value;
use strum::Display;

use super::{FieldCodec, FieldKind};
use crate::error::CodecError;

/// The kind of value a formula produced for a given record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FormulaKind {
    Empty,
    Text,
    Number,
    Boolean,
    List,
    Error,
}

/// The computed value of a formula, rollup or lookup column.
///
/// The wire type depends on the formula, and can differ between records of
/// the same table, so the variant is chosen from the JSON value itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormulaResult {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Lookups and array rollups.
    List(Vec<FormulaResult>),
    /// `{"error": "#ERROR!"}` style results.
    Error(String),
}

impl FormulaResult {
    pub fn kind(&self) -> FormulaKind {
        match self {
            Self::Empty => FormulaKind::Empty,
            Self::Text(_) => FormulaKind::Text,
            Self::Number(_) => FormulaKind::Number,
            Self::Boolean(_) => FormulaKind::Boolean,
            Self::List(_) => FormulaKind::List,
            Self::Error(_) => FormulaKind::Error,
        }
    }

    /// The value as it appeared on the wire.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or_else(|| serde_json::json!({ "specialValue": special_name(*n) })),
            Self::Boolean(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Error(e) => serde_json::json!({ "error": e }),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FieldCodec for FormulaResult {
    const KIND: FieldKind = FieldKind::FormulaResult;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Null => Ok(Self::Empty),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number).ok_or_else(|| {
                CodecError::OutOfRange {
                    value: n.to_string(),
                    target: "f64",
                }
            }),
            Value::Array(items) => items
                .iter()
                .map(Self::decode)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(map) => {
                if let Some(special) = map.get("specialValue").and_then(Value::as_str) {
                    return special_number(special)
                        .map(Self::Number)
                        .ok_or_else(|| CodecError::unexpected("formula special value", value));
                }
                map.get("error")
                    .and_then(Value::as_str)
                    .map(|e| Self::Error(e.to_string()))
                    .ok_or_else(|| CodecError::unexpected("formula value", value))
            }
        }
    }

    /// Computed columns cannot be written.
    fn encode(&self) -> Option<Value> {
        None
    }
}

/// Non-finite numbers, which JSON cannot carry as plain numbers.
fn special_number(name: &str) -> Option<f64> {
    match name {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn special_name(n: f64) -> &'static str {
    if n.is_nan() {
        "NaN"
    } else if n.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}
