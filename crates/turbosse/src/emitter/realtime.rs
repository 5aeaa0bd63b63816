//! Emitter that writes straight to a live connection.

use std::fmt;
use std::io::{self, Write};

use super::Emitter;
use crate::error::{StreamError, StreamResult};

/// Blocking connection primitives driven by a [`RealtimeEmitter`].
///
/// Every call blocks until the transport accepts the data.
pub trait Transport {
    /// Send (or queue) a response header.
    fn send_header(&mut self, name: &str, value: &str) -> io::Result<()>;

    /// Whether the response head has already been committed.
    fn headers_sent(&self) -> bool;

    /// Write body bytes to the output buffer.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Push the output buffer into the connection.
    fn flush_output_buffer(&mut self) -> io::Result<()>;

    /// Ask the connection itself to transmit everything it holds.
    fn flush_transport(&mut self) -> io::Result<()>;
}

/// Forwards stream output to a [`Transport`] and forces delivery on flush.
#[derive(Debug)]
pub struct RealtimeEmitter<T> {
    transport: T,
}

impl<T: Transport> RealtimeEmitter<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: Transport> Emitter for RealtimeEmitter<T> {
    fn set_header(&mut self, name: &str, value: &str) -> StreamResult<()> {
        if name.is_empty() {
            return Err(StreamError::invalid_header("header name must not be empty"));
        }
        self.transport.send_header(name, value)?;
        Ok(())
    }

    fn headers_sent(&self) -> bool {
        self.transport.headers_sent()
    }

    fn write_body_line(&mut self, line: &str) -> StreamResult<()> {
        self.transport.write(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.transport.flush_output_buffer()?;
        self.transport.flush_transport()?;
        Ok(())
    }
}

/// HTTP/1.1 response transport over any blocking writer.
///
/// Headers are queued until the first body byte or flush, then written as a
/// `200 OK` response head. Body output collects in an internal buffer that
/// [`flush_output_buffer`](Transport::flush_output_buffer) drains into the
/// writer.
///
/// The body is delimited by connection close, the usual framing for an
/// event stream that has no known length.
///
/// A failed write to the writer may leave part of the head or of a record
/// on the wire, so the transport is poisoned: every later call fails with
/// [`io::ErrorKind::BrokenPipe`].
pub struct Http1Transport<W: Write> {
    writer: W,
    pending_headers: Vec<(String, String)>,
    head_written: bool,
    poisoned: bool,
    buffer: Vec<u8>,
}

impl<W: Write> Http1Transport<W> {
    /// Wrap a writer, typically a `TcpStream`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending_headers: Vec::new(),
            head_written: false,
            poisoned: false,
            buffer: Vec::new(),
        }
    }

    /// Mark the response head as already written by other code.
    ///
    /// Streams opened on this transport afterwards fail with
    /// [`StreamError::AlreadyActive`].
    pub fn with_head_written(mut self) -> Self {
        self.head_written = true;
        self
    }

    /// Borrow the writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwrap the writer. Output still sitting in the buffer is discarded.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_usable(&self) -> io::Result<()> {
        if self.poisoned {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "earlier write to the connection failed",
            ));
        }
        Ok(())
    }

    fn write_head(&mut self) -> io::Result<()> {
        self.ensure_usable()?;
        if self.head_written {
            return Ok(());
        }

        let mut head = String::from("HTTP/1.1 200 OK\r\n");
        for (name, value) in &self.pending_headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        if let Err(e) = self.writer.write_all(head.as_bytes()) {
            self.poisoned = true;
            return Err(e);
        }
        self.pending_headers.clear();
        self.head_written = true;
        tracing::trace!(bytes = head.len(), "response head committed");
        Ok(())
    }
}

impl<W: Write> Transport for Http1Transport<W> {
    fn send_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.ensure_usable()?;
        if self.head_written {
            return Err(io::Error::other("headers already sent"));
        }
        if name.contains([':', '\r', '\n']) || value.contains(['\r', '\n']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid header {name:?}: {value:?}"),
            ));
        }
        self.pending_headers.push((name.to_owned(), value.to_owned()));
        Ok(())
    }

    fn headers_sent(&self) -> bool {
        self.head_written
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_head()?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn flush_output_buffer(&mut self) -> io::Result<()> {
        self.write_head()?;
        if !self.buffer.is_empty() {
            if let Err(e) = self.writer.write_all(&self.buffer) {
                self.poisoned = true;
                return Err(e);
            }
            self.buffer.clear();
        }
        Ok(())
    }

    fn flush_transport(&mut self) -> io::Result<()> {
        self.ensure_usable()?;
        self.writer.flush()
    }
}

impl<W: Write> fmt::Debug for Http1Transport<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Http1Transport")
            .field("pending_headers", &self.pending_headers)
            .field("head_written", &self.head_written)
            .field("poisoned", &self.poisoned)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}
