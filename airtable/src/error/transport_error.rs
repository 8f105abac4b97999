//! Network and connection errors.

use thiserror::Error;

/// Errors from the HTTP transport layer.
///
/// These never carry an API verdict: either no response arrived, or its body
/// could not be read off the wire.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or no response was received.
    #[error("HTTP request failed: {0}")]
    Send(#[source] reqwest::Error),

    /// The response arrived but reading its body failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl TransportError {
    fn inner(&self) -> &reqwest::Error {
        match self {
            Self::Send(e) | Self::Body(e) => e,
        }
    }

    /// Returns `true` if the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        self.inner().is_timeout()
    }

    /// Returns `true` if no connection could be established.
    pub fn is_connect(&self) -> bool {
        self.inner().is_connect()
    }
}
