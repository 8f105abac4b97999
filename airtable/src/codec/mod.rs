//! Field codecs.
//!
//! Every column type the client understands is a native type implementing
//! [`FieldCodec`]. The derive macro picks the codec from a field's type, so a
//! record declares its column kinds simply by using these types:
//!
//! ```rust,ignore
//! use airtable::{Checkbox, Date, LongText, Record, Text};
//!
//! #[derive(Debug, Default, Record)]
//! struct Task {
//!     #[airtable(rename = "Task name")]
//!     name: Text,
//!     notes: LongText,
//!     done: Checkbox,
//!     due: Option<Date>,
//! }
//! ```

mod attachment;
mod date;
mod formula;
mod list;
mod scalar;
mod text;

pub use attachment::{Attachment, AttachmentFile, Thumbnail, Thumbnails};
pub use date::Date;
pub use formula::{FormulaKind, FormulaResult};
pub use list::{MultipleSelect, RecordLink};
pub use scalar::{Checkbox, Rating};
pub use text::{LongText, Text};

use serde_json::Value;
use strum::{Display, EnumIter};

use crate::error::CodecError;

/// The closed set of column kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum FieldKind {
    Text,
    LongText,
    Date,
    Rating,
    Checkbox,
    MultipleSelect,
    Attachment,
    RecordLink,
    FormulaResult,
}

/// Conversion between one column's JSON value and its native type.
pub trait FieldCodec: Sized + Default {
    /// The column kind this codec handles.
    const KIND: FieldKind;

    /// Converts a present, non-null JSON value.
    fn decode(value: &Value) -> Result<Self, CodecError>;

    /// Converts back to JSON. `None` means the column is omitted on write.
    fn encode(&self) -> Option<Value>;

    /// Decodes a column that may be absent from the record.
    ///
    /// The API leaves out empty cells entirely, so absence and `null` both
    /// decode to the type's default.
    fn decode_column(value: Option<&Value>) -> Result<Self, CodecError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => Self::decode(value),
        }
    }
}

/// Wrapping a codec in `Option` distinguishes an empty cell from a default value.
impl<T: FieldCodec> FieldCodec for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        T::decode(value).map(Some)
    }

    fn encode(&self) -> Option<Value> {
        self.as_ref().and_then(T::encode)
    }
}

/// Decodes a JSON array of strings, keeping API order.
fn decode_strings(value: &Value) -> Result<Vec<String>, CodecError> {
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::unexpected("array of strings", value))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| CodecError::unexpected("string", item))
        })
        .collect()
}

fn encode_strings(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}
