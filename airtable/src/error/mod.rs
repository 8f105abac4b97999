//! Layered error types for the Airtable client.
//!
//! The hierarchy keeps API-reported failures apart from everything else:
//! - [`AirtableError`] - Top-level error type for all client operations
//! - [`TransportError`] - Network and connection failures
//! - [`ClientRequestError`] - The API answered with a non-2xx status
//! - [`DecodeError`] / [`FieldDecodeError`] / [`CodecError`] - Response decoding failures
//! - [`QueryEncodingError`] - Malformed query options, raised before any request
//! - [`ConfigError`] - Client, endpoint and record descriptor configuration errors

mod airtable_error;
mod config_error;
mod decode_error;
mod query_error;
mod request_error;
mod transport_error;

pub use airtable_error::AirtableError;
pub use config_error::ConfigError;
pub use decode_error::{CodecError, DecodeError, FieldDecodeError};
pub use query_error::QueryEncodingError;
pub use request_error::ClientRequestError;
pub use transport_error::TransportError;
