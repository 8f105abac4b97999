//! Errors reported by the API itself.

use serde::Deserialize;
use thiserror::Error;

/// The API answered with a non-success HTTP status.
///
/// Carries the original status code together with the machine-readable error
/// type and human message from the response body, when the body has them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}{}: {message}", type_suffix(.error_type))]
pub struct ClientRequestError {
    /// The HTTP status code returned.
    pub status: u16,
    /// Machine-readable error code such as `INVALID_REQUEST_UNKNOWN`.
    pub error_type: Option<String>,
    /// Human-readable message.
    pub message: String,
}

fn type_suffix(error_type: &Option<String>) -> String {
    error_type
        .as_deref()
        .map(|t| format!(" {t}"))
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed {
        #[serde(rename = "type")]
        error_type: String,
        #[serde(default)]
        message: Option<String>,
    },
    Code(String),
}

impl ClientRequestError {
    pub fn new(status: u16, error_type: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error_type,
            message: message.into(),
        }
    }

    /// Builds the error from a non-2xx response.
    ///
    /// Understands both `{"error": {"type": ..., "message": ...}}` and the short
    /// `{"error": "NOT_FOUND"}` form. Anything else keeps the raw body text as
    /// the message, or `reason` when the body is empty.
    pub fn from_response(status: u16, reason: &str, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error:
                    ErrorBody::Detailed {
                        error_type,
                        message,
                    },
            }) => Self::new(
                status,
                Some(error_type),
                message.unwrap_or_else(|| reason.to_string()),
            ),
            Ok(ErrorEnvelope {
                error: ErrorBody::Code(code),
            }) => Self::new(status, Some(code), reason),
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                let text = text.trim();
                let message = if text.is_empty() { reason } else { text };
                Self::new(status, None, message)
            }
        }
    }

    /// 401: the API key was missing or rejected.
    pub fn is_authentication(&self) -> bool {
        self.status == 401
    }

    /// 403: the key is valid but lacks access to the base or table.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// 404: unknown base, table or record.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// 429: too many requests against the base.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns `true` if repeating the request may succeed.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.is_rate_limited()
    }
}
