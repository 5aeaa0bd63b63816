//! Output sinks for event streams.
//!
//! An [`Emitter`] is the only way a stream produces output. The stream never
//! touches a socket, a response object or any process-wide buffer directly;
//! it drives the emitter it was built with.
//!
//! Two emitters ship with the crate:
//!
//! | Emitter | Output | `flush()` | `headers_sent()` |
//! |---------|--------|-----------|------------------|
//! | [`BufferingEmitter`] | in-memory `http::Response` | no-op | always `false` |
//! | [`RealtimeEmitter`] | live [`Transport`] | drains buffer, flushes transport | transport state |

mod buffering;
mod realtime;

pub use buffering::BufferingEmitter;
pub use realtime::{Http1Transport, RealtimeEmitter, Transport};

use crate::error::StreamResult;

/// Capability to write stream headers and body output.
pub trait Emitter {
    /// Register or send a response header. `name` must be non-empty.
    fn set_header(&mut self, name: &str, value: &str) -> StreamResult<()>;

    /// Whether the underlying transport has already committed its headers.
    fn headers_sent(&self) -> bool;

    /// Append one non-empty chunk of body output: a field line or a bare
    /// line separator.
    fn write_body_line(&mut self, line: &str) -> StreamResult<()>;

    /// Push buffered body output to the transport. No-op when nothing is
    /// buffered.
    fn flush(&mut self) -> StreamResult<()>;
}
