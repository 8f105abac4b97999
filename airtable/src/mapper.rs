//! Conversion between wire records and native [`Record`] values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::FieldKind;
use crate::error::{CodecError, DecodeError, FieldDecodeError};
use crate::record::{Record, RecordDescriptor, RecordMeta};

const CREATED_TIME_COLUMN: &str = "createdTime";

/// A record as the API sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of a list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub records: Vec<RawRecord>,
    /// Cursor for the next page; absent on the last page.
    #[serde(default)]
    pub offset: Option<String>,
}

impl ListPage {
    /// The cursor to follow, treating an empty string as no cursor.
    pub fn next_offset(&self) -> Option<&str> {
        self.offset.as_deref().filter(|o| !o.is_empty())
    }
}

/// Decodes a wire record into a fresh `R`.
pub fn decode_record<R: Record>(
    descriptor: &RecordDescriptor,
    raw: &RawRecord,
) -> Result<R, FieldDecodeError> {
    let mut record = R::default();
    decode_into(descriptor, raw, &mut record)?;
    Ok(record)
}

/// Decodes a wire record into an existing value.
///
/// Mapped columns missing from `raw` reset their field to its default. Unknown
/// columns are ignored. Stops at the first column that fails; fields decoded
/// before it keep their new values.
pub fn decode_into<R: Record>(
    descriptor: &RecordDescriptor,
    raw: &RawRecord,
    dest: &mut R,
) -> Result<(), FieldDecodeError> {
    for field in descriptor.fields() {
        dest.decode_field(field.field, raw.fields.get(field.column))
            .map_err(|source| FieldDecodeError {
                column: field.column.to_string(),
                kind: field.kind,
                source,
            })?;
    }

    let created_time = raw
        .created_time
        .as_deref()
        .map(parse_created_time)
        .transpose()?;

    dest.set_metadata(RecordMeta {
        id: raw.id.clone(),
        created_time,
    });
    Ok(())
}

/// Encodes a native record back into wire form.
///
/// Fields whose codec declines to encode (computed columns) are omitted.
pub fn encode_record<R: Record>(descriptor: &RecordDescriptor, record: &R) -> RawRecord {
    let fields = descriptor
        .fields()
        .iter()
        .filter_map(|f| {
            record
                .encode_field(f.field)
                .map(|value| (f.column.to_string(), value))
        })
        .collect();

    let meta = record.metadata();
    RawRecord {
        id: meta.id,
        created_time: meta
            .created_time
            .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        fields,
    }
}

/// Parses a single-record response body.
pub fn decode_record_bytes<R: Record>(
    descriptor: &RecordDescriptor,
    body: &[u8],
    dest: &mut R,
) -> Result<(), DecodeError> {
    let raw: RawRecord = serde_json::from_slice(body)?;
    decode_into(descriptor, &raw, dest)?;
    Ok(())
}

/// Parses a list response body into decoded records and the next cursor.
pub fn decode_page_bytes<R: Record>(
    descriptor: &RecordDescriptor,
    body: &[u8],
) -> Result<(Vec<R>, Option<String>), DecodeError> {
    let page: ListPage = serde_json::from_slice(body)?;
    let offset = page.next_offset().map(str::to_string);
    let records = page
        .records
        .iter()
        .map(|raw| decode_record(descriptor, raw))
        .collect::<Result<Vec<R>, _>>()?;
    Ok((records, offset))
}

fn parse_created_time(s: &str) -> Result<DateTime<Utc>, FieldDecodeError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| FieldDecodeError {
            column: CREATED_TIME_COLUMN.to_string(),
            kind: FieldKind::Date,
            source: CodecError::InvalidDate {
                value: s.to_string(),
                source,
            },
        })
}
