use serde_json::Value;

use super::{decode_strings, encode_strings, FieldCodec, FieldKind};
use crate::error::CodecError;

/// Chosen options of a multiple select column, in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MultipleSelect(pub Vec<String>);

impl FieldCodec for MultipleSelect {
    const KIND: FieldKind = FieldKind::MultipleSelect;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        decode_strings(value).map(Self)
    }

    fn encode(&self) -> Option<Value> {
        Some(encode_strings(&self.0))
    }
}

/// Ids of linked records.
///
/// The linked records are not fetched; resolve them with
/// [`Table::get`](crate::Table::get) on the linked table when needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordLink(pub Vec<String>);

impl FieldCodec for RecordLink {
    const KIND: FieldKind = FieldKind::RecordLink;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        decode_strings(value).map(Self)
    }

    fn encode(&self) -> Option<Value> {
        Some(encode_strings(&self.0))
    }
}

impl MultipleSelect {
    pub fn contains(&self, option: &str) -> bool {
        self.0.iter().any(|o| o == option)
    }
}

impl RecordLink {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_multiple_select_keeps_order() {
        let select = MultipleSelect::decode(&json!(["zebra", "ant", "moose"])).unwrap();
        assert_eq!(select.0, vec!["zebra", "ant", "moose"]);
        assert!(select.contains("ant"));
        assert_eq!(MultipleSelect::decode(&select.encode().unwrap()).unwrap(), select);
    }

    #[test]
    fn test_missing_multiple_select_is_empty() {
        assert!(MultipleSelect::decode_column(None).unwrap().0.is_empty());
    }

    #[test]
    fn test_record_link() {
        let link = RecordLink::decode(&json!(["recA", "recB"])).unwrap();
        assert_eq!(link.ids().collect::<Vec<_>>(), vec!["recA", "recB"]);
        assert_eq!(RecordLink::decode(&link.encode().unwrap()).unwrap(), link);
    }

    #[test]
    fn test_record_link_rejects_objects() {
        assert!(matches!(
            RecordLink::decode(&json!({"id": "recA"})),
            Err(CodecError::UnexpectedShape { found: "object", .. })
        ));
    }
}
