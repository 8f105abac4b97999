//! Typed client for the Airtable REST API.
//!
//! Records are plain structs whose fields are column codecs. Deriving
//! [`Record`] maps each field to a column; a [`Table`] then lists or fetches
//! records of that type, following pagination for you.
//!
//! ## Examples
//!
//! ```ignore
//! use airtable::{Client, Date, ListOptions, MultipleSelect, Record, Text};
//!
//! #[derive(Debug, Default, Record)]
//! struct Pet {
//!     #[airtable(id)]
//!     id: String,
//!     #[airtable(rename = "Name")]
//!     name: Text,
//!     #[airtable(rename = "When?")]
//!     adopted: Date,
//!     #[airtable(rename = "Animals")]
//!     kinds: MultipleSelect,
//! }
//!
//! let client = Client::from_env()?;
//! let pets = client.table::<Pet>("Pets")?;
//!
//! let options = ListOptions::new().field("Name").view("Grid view");
//! for pet in pets.list(&options).await? {
//!     println!("{} {}", pet.id, pet.name);
//! }
//!
//! let one = pets.fetch("recXXXXXXXXXXXXXX", &ListOptions::new()).await?;
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`AirtableError`], which separates
//! transport failures, API-reported errors, decoding problems, query
//! encoding problems and configuration mistakes.

extern crate self as airtable;

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod mapper;
pub mod query;
pub mod record;
pub mod table;

pub use client::{Client, ClientBuilder};
pub use codec::{
    Attachment, AttachmentFile, Checkbox, Date, FieldCodec, FieldKind, FormulaKind,
    FormulaResult, LongText, MultipleSelect, Rating, RecordLink, Text, Thumbnail, Thumbnails,
};
pub use config::ClientConfig;
pub use error::{
    AirtableError, ClientRequestError, CodecError, ConfigError, DecodeError, FieldDecodeError,
    QueryEncodingError, TransportError,
};
pub use mapper::RawRecord;
pub use query::{CellFormat, ListOptions, QueryEncoder, QueryParams, Sort, SortDirection};
pub use record::{FieldDescriptor, Record, RecordDescriptor, RecordMeta};
pub use table::Table;

/// Derives [`Record`] for a struct with named fields.
///
/// Field attributes:
///
/// - `#[airtable(rename = "Column")]` - column name (defaults to the field name)
/// - `#[airtable(id)]` - receives the record id (`String` or `Option<String>`)
/// - `#[airtable(created_time)]` - receives the creation time
/// - `#[airtable(skip)]` - not mapped; left at its `Default`
pub use airtable_macros::Record;

pub use reqwest::Method;

#[doc(hidden)]
pub mod __private {
    pub use crate::record::MetaSlot;
    pub use chrono::{DateTime, Utc};
    pub use serde_json::Value;
}
