//! Record types and their column descriptors.
//!
//! A [`Record`] is a caller-declared struct whose fields are column codecs.
//! `#[derive(Record)]` generates the implementation; the [`RecordDescriptor`]
//! it returns is computed once when a [`Table`](crate::Table) is bound and
//! reused for every request.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::codec::{FieldCodec, FieldKind};
use crate::error::{CodecError, ConfigError};

/// A native record type that can be decoded from (and encoded to) API records.
///
/// Implement with `#[derive(Record)]`:
///
/// ```rust,ignore
/// use airtable::{Date, MultipleSelect, Record, Text};
///
/// #[derive(Debug, Default, Record)]
/// struct Pet {
///     #[airtable(id)]
///     id: String,
///     name: Text,
///     #[airtable(rename = "When?")]
///     adopted: Date,
///     tags: MultipleSelect,
///     #[airtable(skip)]
///     local_only: u32,
/// }
/// ```
pub trait Record: Default {
    /// The column mapping for this type.
    fn descriptor() -> RecordDescriptor;

    /// Decodes one column into the field named `field`.
    ///
    /// `value` is `None` when the record does not contain the column.
    fn decode_field(&mut self, field: &str, value: Option<&Value>) -> Result<(), CodecError>;

    /// Encodes the field named `field`, or `None` if it is not written.
    fn encode_field(&self, field: &str) -> Option<Value>;

    /// Stores record metadata in the fields marked `id` / `created_time`.
    fn set_metadata(&mut self, _meta: RecordMeta) {}

    /// Reads back record metadata.
    fn metadata(&self) -> RecordMeta {
        RecordMeta::default()
    }
}

/// Top-level metadata the API sends next to a record's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMeta {
    pub id: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
}

/// One mapped field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The Rust field name.
    pub field: &'static str,
    /// The column name on the wire.
    pub column: &'static str,
    pub kind: FieldKind,
}

/// The column mapping of one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    id_field: Option<&'static str>,
    created_time_field: Option<&'static str>,
}

impl RecordDescriptor {
    pub fn builder(name: &'static str) -> RecordDescriptorBuilder {
        RecordDescriptorBuilder {
            descriptor: RecordDescriptor {
                name,
                fields: Vec::new(),
                id_field: None,
                created_time_field: None,
            },
        }
    }

    /// The record type's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a mapped field by column name.
    pub fn column(&self, column: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Column names in declaration order, e.g. for a `fields[]` filter.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.column)
    }

    pub fn id_field(&self) -> Option<&'static str> {
        self.id_field
    }

    pub fn created_time_field(&self) -> Option<&'static str> {
        self.created_time_field
    }

    /// Checks that no column is mapped twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.column) {
                return Err(ConfigError::DuplicateColumn {
                    record: self.name,
                    column: field.column.to_string(),
                });
            }
        }
        Ok(())
    }
}

pub struct RecordDescriptorBuilder {
    descriptor: RecordDescriptor,
}

impl RecordDescriptorBuilder {
    /// Maps `field` to `column`, with the codec implied by `C`.
    pub fn column<C: FieldCodec>(mut self, field: &'static str, column: &'static str) -> Self {
        self.descriptor.fields.push(FieldDescriptor {
            field,
            column,
            kind: C::KIND,
        });
        self
    }

    pub fn id_field(mut self, field: &'static str) -> Self {
        self.descriptor.id_field = Some(field);
        self
    }

    pub fn created_time_field(mut self, field: &'static str) -> Self {
        self.descriptor.created_time_field = Some(field);
        self
    }

    pub fn build(self) -> RecordDescriptor {
        self.descriptor
    }
}

/// A struct field that can hold a piece of [`RecordMeta`].
///
/// Lets `#[airtable(id)]` accept `String` or `Option<String>`, and
/// `#[airtable(created_time)]` accept `DateTime<Utc>` or `Option<DateTime<Utc>>`.
pub trait MetaSlot<T> {
    fn fill(&mut self, value: Option<T>);
    fn read(&self) -> Option<T>;
}

impl MetaSlot<String> for String {
    fn fill(&mut self, value: Option<String>) {
        *self = value.unwrap_or_default();
    }

    fn read(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

impl MetaSlot<DateTime<Utc>> for DateTime<Utc> {
    fn fill(&mut self, value: Option<DateTime<Utc>>) {
        *self = value.unwrap_or_default();
    }

    /// The epoch default means "never set".
    fn read(&self) -> Option<DateTime<Utc>> {
        (*self != DateTime::<Utc>::default()).then_some(*self)
    }
}

impl<T: Clone> MetaSlot<T> for Option<T> {
    fn fill(&mut self, value: Option<T>) {
        *self = value;
    }

    fn read(&self) -> Option<T> {
        self.clone()
    }
}
