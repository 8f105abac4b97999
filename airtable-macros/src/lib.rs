//! Procedural macros for the `airtable` crate.
//!
//! Provides `#[derive(Record)]`, which maps the named fields of a struct to
//! table columns. Use it through the `airtable` crate, which re-exports it
//! next to the trait of the same name.
//!
//! ## Examples
//!
//! ```ignore
//! use airtable::{Date, Rating, Record, Text};
//!
//! #[derive(Debug, Default, Record)]
//! struct Review {
//!     #[airtable(id)]
//!     id: String,
//!     #[airtable(rename = "Name")]
//!     name: Text,
//!     #[airtable(rename = "When?")]
//!     when: Date,
//!     stars: Rating,
//!     #[airtable(skip)]
//!     dirty: bool,
//! }
//! ```

use proc_macro::TokenStream;

mod codegen;
mod derive_record;
mod parse;

/// Derive macro for record types.
///
/// Every named field is mapped to a column unless marked otherwise. A mapped
/// field's type must implement `airtable::FieldCodec`.
///
/// ## Attributes
///
/// - `#[airtable(rename = "...")]` - Column name (defaults to the field name)
/// - `#[airtable(id)]` - Receives the record id; `String` or `Option<String>`
/// - `#[airtable(created_time)]` - Receives the creation time;
///   `DateTime<Utc>` or `Option<DateTime<Utc>>`
/// - `#[airtable(skip)]` - Not mapped
///
/// Two fields mapping to the same column, or more than one `id` /
/// `created_time` field, is a compile error.
#[proc_macro_derive(Record, attributes(airtable))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    derive_record::derive_record_impl(input.into()).into()
}
