//! # TurboSSE
//!
//! Server side of the Server-Sent Events (SSE) protocol: a long-lived,
//! one-directional text channel pushed from a server to a client over an
//! ordinary HTTP response.
//!
//! ## Overview
//!
//! This crate provides:
//! - **Stream**: [`EventStream`], the `Inactive -> Active -> Closed` lifecycle state machine
//! - **Framing**: [`Frame`], the `id`/`event`/`data`/`retry` record encoder shared by every variant
//! - **Emitters**: [`BufferingEmitter`] (build-and-return a response) and
//!   [`RealtimeEmitter`] (write-and-flush a live connection)
//! - **Transports**: the [`Transport`] trait and the blocking [`Http1Transport`]
//! - **Negotiation**: [`can_handle`], the `Accept: text/event-stream` check
//! - **Errors**: [`StreamError`], [`StreamResult`]
//!
//! ## Usage
//!
//! ```rust
//! use turbosse::{ResponseEventStream, StreamConfig};
//!
//! # fn main() -> turbosse::StreamResult<()> {
//! let config = StreamConfig::new().with_id("feed-1").with_retry_millis(100);
//! let mut stream = ResponseEventStream::buffered(config)?;
//!
//! stream.open()?;
//! stream.send_message("greeting", "hello")?;
//! stream.close()?;
//!
//! let response = stream.into_response()?;
//! assert_eq!(response.headers()["content-type"], "text/event-stream");
//! # Ok(())
//! # }
//! ```
//!
//! ## Threading
//!
//! A stream is single-writer: every mutating operation takes `&mut self`.
//! Share one across threads only behind your own lock. Independent streams
//! share no state and can run concurrently on independent transports.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
pub mod frame;
pub mod id;
pub mod negotiate;
pub mod stream;

// Re-export main types
pub use config::StreamConfig;
pub use emitter::{BufferingEmitter, Emitter, Http1Transport, RealtimeEmitter, Transport};
pub use error::{StreamError, StreamResult};
pub use event::{Event, MessageData, NamedEvent};
pub use frame::{Frame, LINE_SEPARATOR};
pub use id::StreamId;
pub use negotiate::{accepts_event_stream, can_handle};
pub use stream::{
    DEFAULT_CLOSE_EVENT, DEFAULT_MESSAGE_NAME, EventStream, RealtimeEventStream,
    ResponseEventStream, StreamState,
};

/// Header names and values written when a stream is opened.
pub mod headers {
    /// Content-Type for SSE streams
    pub const CONTENT_TYPE_SSE: &str = "text/event-stream";

    /// Accept header value a client sends to request an SSE stream
    pub const ACCEPT_SSE: &str = "text/event-stream";

    /// Disables proxy buffering (nginx) so records reach the client immediately
    pub const X_ACCEL_BUFFERING: &str = "X-Accel-Buffering";

    /// The fixed header set, in emission order.
    pub const STREAM_HEADERS: [(&str, &str); 4] = [
        ("Content-Type", CONTENT_TYPE_SSE),
        ("Cache-Control", "no-cache"),
        ("Connection", "keep-alive"),
        (X_ACCEL_BUFFERING, "no"),
    ];
}
