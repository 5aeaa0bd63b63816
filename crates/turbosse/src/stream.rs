//! The event-stream lifecycle state machine.
//!
//! ```text
//! Inactive --open()--> Active --close()--> Closed
//! ```
//!
//! A single generic [`EventStream`] drives either emitter; the two variants
//! are type aliases:
//!
//! - [`ResponseEventStream`] builds an `http::Response` the caller returns.
//! - [`RealtimeEventStream`] writes to a live transport and flushes after
//!   every record.
//!
//! Guards run before any output, so a rejected call writes nothing.

use bytes::Bytes;
use http::Response;
use tracing::{debug, trace};

use crate::config::StreamConfig;
use crate::emitter::{BufferingEmitter, Emitter, RealtimeEmitter, Transport};
use crate::error::{StreamError, StreamResult};
use crate::event::{Event, MessageData};
use crate::frame::Frame;
use crate::headers::STREAM_HEADERS;
use crate::id::StreamId;

/// Event name used by [`EventStream::send_default_message`].
pub const DEFAULT_MESSAGE_NAME: &str = "message";

/// Event name of the final record sent by [`EventStream::close`].
pub const DEFAULT_CLOSE_EVENT: &str = "done";

/// Lifecycle state of a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StreamState {
    /// Created, not yet opened (initial)
    #[default]
    Inactive,
    /// Headers set, records may be sent
    Active,
    /// Final record sent (terminal)
    Closed,
}

/// One logical SSE connection.
///
/// Owns its emitter exclusively for its whole lifetime. All mutating
/// operations take `&mut self`; there is no internal locking.
#[derive(Debug)]
pub struct EventStream<E> {
    id: StreamId,
    retry_millis: u64,
    state: StreamState,
    emitter: E,
}

/// Stream that assembles a buffered `http::Response`.
pub type ResponseEventStream = EventStream<BufferingEmitter>;

/// Stream that writes to a live transport and flushes every record.
pub type RealtimeEventStream<T> = EventStream<RealtimeEmitter<T>>;

impl<E: Emitter> EventStream<E> {
    /// Create a stream over `emitter`.
    ///
    /// The id comes from `config.id`, or is generated when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidId`] if the configured id is empty or
    /// contains a line break.
    pub fn new(config: StreamConfig, emitter: E) -> StreamResult<Self> {
        let id = StreamId::from_option(config.id)?;
        Ok(Self::with_id(id, config.retry_millis, emitter))
    }

    /// Create a stream from an already validated id.
    pub fn with_id(id: StreamId, retry_millis: u64, emitter: E) -> Self {
        Self {
            id,
            retry_millis,
            state: StreamState::Inactive,
            emitter,
        }
    }

    /// Activate the stream and set the event-stream headers.
    ///
    /// A stream opens at most once: reopening a closed stream is refused
    /// like any second `open()`.
    ///
    /// If the emitter rejects a header after earlier ones were accepted, the
    /// stream is closed without a final record and cannot be reopened, since
    /// the partial header set is already queued. Build a new stream on a
    /// fresh transport instead.
    ///
    /// # Errors
    ///
    /// - [`StreamError::AlreadyActive`] if the stream was opened before
    ///   (active or closed), or the emitter reports that headers were
    ///   already sent.
    /// - Any header failure reported by the emitter.
    pub fn open(&mut self) -> StreamResult<()> {
        if self.state != StreamState::Inactive || self.emitter.headers_sent() {
            return Err(StreamError::AlreadyActive);
        }

        for (index, (name, value)) in STREAM_HEADERS.into_iter().enumerate() {
            if let Err(e) = self.emitter.set_header(name, value) {
                if index > 0 {
                    self.state = StreamState::Closed;
                }
                return Err(e);
            }
        }

        self.state = StreamState::Active;
        debug!(stream_id = %self.id, retry_ms = self.retry_millis, "event stream opened");
        Ok(())
    }

    /// Send an application event; its JSON serialization becomes `data`.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] / [`StreamError::Inactive`] outside the
    ///   active state.
    /// - [`StreamError::Serialization`] if the payload cannot be encoded.
    /// - [`StreamError::InvalidField`] if the event name is empty or
    ///   multi-line.
    pub fn send_event<V: Event + ?Sized>(&mut self, event: &V) -> StreamResult<()> {
        self.ensure_active()?;
        let data = serde_json::to_string(event)?;
        self.emit(event.name(), &data)
    }

    /// Send a plain message; `data` is written verbatim.
    ///
    /// ```rust
    /// # use turbosse::{MessageData, ResponseEventStream, StreamConfig};
    /// # fn main() -> turbosse::StreamResult<()> {
    /// let mut stream = ResponseEventStream::buffered(StreamConfig::new())?;
    /// stream.open()?;
    /// stream.send_message("count", 3)?;
    /// stream.send_message("ping", MessageData::Null)?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] / [`StreamError::Inactive`] outside the
    ///   active state.
    /// - [`StreamError::InvalidField`] if `name` is empty or multi-line.
    pub fn send_message(&mut self, name: &str, data: impl Into<MessageData>) -> StreamResult<()> {
        self.ensure_active()?;
        let data = data.into().to_string();
        self.emit(name, &data)
    }

    /// Send a `message` record with empty data.
    ///
    /// # Errors
    ///
    /// Same as [`send_message`](Self::send_message).
    pub fn send_default_message(&mut self) -> StreamResult<()> {
        self.send_message(DEFAULT_MESSAGE_NAME, MessageData::Null)
    }

    /// Send the final `done` record and close the stream.
    ///
    /// # Errors
    ///
    /// Same as [`close_with`](Self::close_with).
    pub fn close(&mut self) -> StreamResult<()> {
        self.close_with(DEFAULT_CLOSE_EVENT)
    }

    /// Send a final record named `event_name` and close the stream.
    ///
    /// The stream only transitions to closed once the final record was
    /// written.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Closed`] if already closed.
    /// - [`StreamError::Inactive`] if never opened.
    /// - [`StreamError::InvalidField`] or an emitter failure while writing
    ///   the final record.
    pub fn close_with(&mut self, event_name: &str) -> StreamResult<()> {
        self.send_message(event_name, MessageData::Null)?;
        self.state = StreamState::Closed;
        debug!(stream_id = %self.id, event = event_name, "event stream closed");
        Ok(())
    }

    /// `true` iff the stream is open and not yet closed.
    pub fn is_active(&self) -> bool {
        self.state == StreamState::Active
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// The stream id.
    pub fn id(&self) -> &StreamId {
        &self.id
    }

    /// Reconnection delay advertised in every record.
    pub fn retry_millis(&self) -> u64 {
        self.retry_millis
    }

    /// Borrow the emitter.
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Whether `request` asks for an event stream. See [`can_handle`](crate::can_handle).
    pub fn can_handle<B>(request: &http::Request<B>) -> bool {
        crate::negotiate::can_handle(request)
    }

    fn ensure_active(&self) -> StreamResult<()> {
        match self.state {
            StreamState::Active => Ok(()),
            StreamState::Closed => Err(StreamError::Closed),
            StreamState::Inactive => Err(StreamError::Inactive),
        }
    }

    fn emit(&mut self, event: &str, data: &str) -> StreamResult<()> {
        let frame = Frame::new(self.id.as_str(), event, data, self.retry_millis)?;
        frame.write_to(&mut self.emitter)?;
        self.emitter.flush()?;
        trace!(stream_id = %self.id, event, bytes = data.len(), "record sent");
        Ok(())
    }
}

impl EventStream<BufferingEmitter> {
    /// Create a stream that builds its own response.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidId`] for an unusable configured id.
    pub fn buffered(config: StreamConfig) -> StreamResult<Self> {
        Self::new(config, BufferingEmitter::new())
    }

    /// Snapshot of the response built so far.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Inactive`] before [`open`](Self::open).
    pub fn response(&self) -> StreamResult<Response<Bytes>> {
        self.ensure_opened()?;
        Ok(self.emitter.to_response())
    }

    /// Hand the response off, consuming the stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Inactive`] before [`open`](Self::open).
    pub fn into_response(self) -> StreamResult<Response<Bytes>> {
        self.ensure_opened()?;
        Ok(self.emitter.into_response())
    }

    fn ensure_opened(&self) -> StreamResult<()> {
        if self.state == StreamState::Inactive {
            return Err(StreamError::Inactive);
        }
        Ok(())
    }
}

impl<T: Transport> EventStream<RealtimeEmitter<T>> {
    /// Create a stream that writes to `transport` as records are sent.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidId`] for an unusable configured id.
    pub fn realtime(config: StreamConfig, transport: T) -> StreamResult<Self> {
        Self::new(config, RealtimeEmitter::new(transport))
    }

    /// Release the transport.
    pub fn into_transport(self) -> T {
        self.emitter.into_inner()
    }
}
