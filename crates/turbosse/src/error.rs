//! Stream error types.

use thiserror::Error;

/// A specialized `Result` type for event-stream operations.
pub type StreamResult<T> = std::result::Result<T, StreamError>;

/// Represents errors that can occur while driving an event stream.
///
/// The first three variants are lifecycle violations: the caller issued an
/// operation out of order. They are never retried or suppressed internally.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StreamError {
    /// `open()` was called on a stream that was opened before (active or
    /// closed), or the underlying transport committed its headers through
    /// other means.
    #[error("Event stream is already active. Close the current stream before opening a new one.")]
    AlreadyActive,

    /// An operation that needs an open stream was attempted before `open()`.
    #[error("No active stream detected. Open a new event stream first.")]
    Inactive,

    /// A send or close was attempted after `close()`.
    #[error("Event stream is closed. Create a new event stream to send further events.")]
    Closed,

    /// The event payload could not be serialized to JSON.
    #[error("Failed to serialize event payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The supplied stream id cannot be used as an SSE `id` field.
    #[error("Invalid stream id: {0}")]
    InvalidId(String),

    /// A record field value would corrupt the line-based framing.
    #[error("Invalid {field} field: {reason}")]
    InvalidField {
        /// The SSE field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The sink rejected a header name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The underlying transport failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// Create an invalid field error
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid header error
    #[must_use]
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }

    /// Returns `true` for the three lifecycle-sequencing errors.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::AlreadyActive | Self::Inactive | Self::Closed)
    }
}

impl From<http::header::InvalidHeaderName> for StreamError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for StreamError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}
