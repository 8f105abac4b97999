use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldCodec, FieldKind};
use crate::error::CodecError;

/// Files in an attachment column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment(pub Vec<AttachmentFile>);

/// One attached file. Sub-fields the client does not know are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Thumbnails>,
}

/// Generated previews, present for images and some documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl FieldCodec for Attachment {
    const KIND: FieldKind = FieldKind::Attachment;

    fn decode(value: &Value) -> Result<Self, CodecError> {
        if !value.is_array() {
            return Err(CodecError::unexpected("array of attachments", value));
        }
        Vec::<AttachmentFile>::deserialize(value)
            .map(Self)
            .map_err(CodecError::Attachment)
    }

    fn encode(&self) -> Option<Value> {
        serde_json::to_value(&self.0).ok()
    }
}
