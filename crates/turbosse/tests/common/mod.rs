//! Common test utilities for integration tests
//!
//! Recording sinks that capture every header, body chunk and flush so tests
//! can assert on exact call sequences.

#![allow(dead_code)]

use std::io;

use serde::Serialize;
use turbosse::{Emitter, Event, StreamError, StreamResult, Transport};

/// Emitter that records every call.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    pub headers: Vec<(String, String)>,
    pub headers_sent: bool,
    pub body_lines: Vec<String>,
    pub flush_count: usize,
    /// Index of the next `set_header` call to reject, once.
    pub fail_header_at: Option<usize>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitter whose transport already committed headers elsewhere.
    pub fn with_headers_sent() -> Self {
        Self {
            headers_sent: true,
            ..Self::default()
        }
    }

    /// Emitter that rejects the `index`-th header once.
    pub fn failing_header_at(index: usize) -> Self {
        Self {
            fail_header_at: Some(index),
            ..Self::default()
        }
    }

    pub fn body(&self) -> String {
        self.body_lines.concat()
    }
}

impl Emitter for RecordingEmitter {
    fn set_header(&mut self, name: &str, value: &str) -> StreamResult<()> {
        if self.fail_header_at == Some(self.headers.len()) {
            self.fail_header_at = None;
            return Err(StreamError::invalid_header(format!("{name} refused")));
        }
        self.headers.push((name.to_owned(), value.to_owned()));
        Ok(())
    }

    fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    fn write_body_line(&mut self, line: &str) -> StreamResult<()> {
        assert!(!line.is_empty(), "emitters must never receive empty lines");
        self.body_lines.push(line.to_owned());
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        self.flush_count += 1;
        Ok(())
    }
}

/// Transport that records the primitive calls a realtime emitter makes.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub headers: Vec<String>,
    pub headers_sent: bool,
    pub output: Vec<u8>,
    pub delivered: Vec<u8>,
    pub output_flushes: usize,
    pub transport_flushes: usize,
    pub fail_writes: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &str {
        std::str::from_utf8(&self.delivered).unwrap()
    }
}

impl Transport for RecordingTransport {
    fn send_header(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.headers.push(format!("{name}: {value}"));
        Ok(())
    }

    fn headers_sent(&self) -> bool {
        self.headers_sent
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"));
        }
        self.headers_sent = true;
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush_output_buffer(&mut self) -> io::Result<()> {
        self.output_flushes += 1;
        self.delivered.append(&mut self.output);
        Ok(())
    }

    fn flush_transport(&mut self) -> io::Result<()> {
        self.transport_flushes += 1;
        Ok(())
    }
}

/// Event fixture named `fake` that serializes as its data map.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FakeEvent {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl FakeEvent {
    pub fn new(data: serde_json::Value) -> Self {
        match data {
            serde_json::Value::Object(data) => Self { data },
            other => panic!("FakeEvent expects an object, got {other}"),
        }
    }
}

impl Event for FakeEvent {
    fn name(&self) -> &str {
        "fake"
    }
}

/// Event whose payload always fails to serialize.
#[derive(Debug)]
pub struct UnserializableEvent;

impl Serialize for UnserializableEvent {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("payload refused to serialize"))
    }
}

impl Event for UnserializableEvent {
    fn name(&self) -> &str {
        "broken"
    }
}
