//! Query option encoding errors.

use thiserror::Error;

/// The option set cannot be turned into a query string.
///
/// Raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryEncodingError {
    /// A parameter has an empty name.
    #[error("Query parameter name cannot be empty")]
    EmptyKey,

    /// A numeric option is outside what the API accepts.
    #[error("Query parameter `{key}` = {value} is out of range ({min}..={max})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// An option depends on another option that was not set.
    #[error("Query parameter `{key}` is required by {required_by}")]
    MissingParameter {
        key: &'static str,
        required_by: &'static str,
    },
}
