//! Client and record configuration errors.

use thiserror::Error;

/// Errors in client or record configuration.
///
/// These occur while building a [`Client`](crate::Client) or binding a
/// [`Table`](crate::Table), typically indicating programmer errors or a
/// broken environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// The variable that was looked up.
        var: &'static str,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint cannot carry path segments (e.g. `mailto:`).
    #[error("Endpoint `{0}` cannot be used as a REST root")]
    InvalidEndpoint(String),

    /// The API key cannot be sent as an HTTP header.
    #[error("Invalid API key format")]
    InvalidApiKey,

    /// A custom default header has an invalid name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// An identifier such as the base id or table name is empty.
    #[error("{what} cannot be empty")]
    EmptyIdentifier {
        /// What was empty.
        what: &'static str,
    },

    /// Two fields of a record type map to the same column.
    #[error("Record `{record}` maps column `{column}` more than once")]
    DuplicateColumn {
        /// The record type's name.
        record: &'static str,
        /// The repeated column.
        column: String,
    },

    /// The HTTP transport could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    /// Creates an empty identifier error.
    pub fn empty(what: &'static str) -> Self {
        Self::EmptyIdentifier { what }
    }
}
