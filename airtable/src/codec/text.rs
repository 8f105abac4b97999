use std::fmt;
use std::ops::Deref;

use serde_json::Value;

use super::{FieldCodec, FieldKind};
use crate::error::CodecError;

fn decode_string(value: &Value) -> Result<String, CodecError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CodecError::unexpected("string", value))
}

macro_rules! text_codec {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub String);

        impl FieldCodec for $name {
            const KIND: FieldKind = FieldKind::$name;

            fn decode(value: &Value) -> Result<Self, CodecError> {
                decode_string(value).map(Self)
            }

            fn encode(&self) -> Option<Value> {
                Some(Value::String(self.0.clone()))
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

text_codec! {
    /// Single line text.
    Text
}

text_codec! {
    /// Multi-line text. Same wire shape as [`Text`].
    LongText
}
