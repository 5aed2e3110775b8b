//! Error types for the SnailPay client

use thiserror::Error;

/// Result type alias for SnailPay operations
pub type Result<T> = std::result::Result<T, SnailPayError>;

/// Main error type for SnailPay operations
#[derive(Error, Debug)]
pub enum SnailPayError {
    /// Client could not be constructed (missing API key, bad base URL)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required request field was missing; nothing was sent
    #[error("Validation error: missing required field `{field}`")]
    Validation { field: &'static str },

    /// The server answered with a status other than 200.
    ///
    /// The message is the status text alone. The response body is kept for
    /// diagnostics but never rendered.
    #[error("{status_text}")]
    Remote {
        status: u16,
        status_text: String,
        body: String,
    },

    /// HTTP transport error (connection, TLS, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SnailPayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error for a missing field
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Create a remote error from a non-200 status.
    ///
    /// The status text is the canonical reason phrase for the code, or the
    /// numeric code when it has none. A custom phrase sent by the server is
    /// not surfaced: reqwest does not expose the raw status line.
    pub fn remote(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string());

        Self::Remote {
            status: status.as_u16(),
            status_text,
            body: body.into(),
        }
    }

    /// Whether the server rejected the request
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// HTTP status of a remote error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
