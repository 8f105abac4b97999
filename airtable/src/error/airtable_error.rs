//! Top-level client error type.

use super::{
    ClientRequestError, ConfigError, DecodeError, FieldDecodeError, QueryEncodingError,
    TransportError,
};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// Every failure inside the client is returned through this enum; nothing is
/// logged and dropped. Callers that want their own retry policy match on
/// [`AirtableError::Request`] versus [`AirtableError::Transport`].
///
/// ## Examples
///
/// ```rust,ignore
/// use airtable::AirtableError;
///
/// match table.list(&options).await {
///     Ok(records) => println!("{} records", records.len()),
///     Err(AirtableError::Request(e)) if e.is_rate_limited() => back_off(),
///     Err(AirtableError::Transport(e)) => eprintln!("network trouble: {e}"),
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AirtableError {
    /// The request never produced an HTTP response (DNS, connect, timeout, reset).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API responded with a non-success status.
    #[error(transparent)]
    Request(#[from] ClientRequestError),

    /// A successful response could not be decoded into the record type.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The query options could not be encoded.
    #[error(transparent)]
    Query(#[from] QueryEncodingError),

    /// Client or record configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A cancellation token fired before the operation completed.
    #[error("Operation cancelled")]
    Cancelled,
}

impl AirtableError {
    /// Returns `true` if this is a network-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the API-reported error, if that is what this is.
    pub fn request_error(&self) -> Option<&ClientRequestError> {
        match self {
            Self::Request(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the offending column's decode error, if decoding a field failed.
    pub fn field_error(&self) -> Option<&FieldDecodeError> {
        match self {
            Self::Decode(DecodeError::Field(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldDecodeError> for AirtableError {
    fn from(err: FieldDecodeError) -> Self {
        Self::Decode(DecodeError::Field(err))
    }
}
