//! SSE record framing.
//!
//! Every record a stream transmits goes through [`Frame`], so the wire format
//! is identical for the buffered and realtime variants:
//!
//! ```text
//! id: foo
//! event: update
//! data: {"foo":"baz"}
//! retry: 100
//!
//! ```
//!
//! Field order is fixed. Each field line is followed by [`LINE_SEPARATOR`]
//! and the record ends with one bare separator. Data spanning several lines
//! is written as consecutive `data:` lines, which clients join back with
//! `\n`.

use std::borrow::Cow;

use crate::emitter::Emitter;
use crate::error::{StreamError, StreamResult};

/// Line separator used for every line of the body.
pub const LINE_SEPARATOR: &str = "\n";

/// One SSE record, validated and ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    id: &'a str,
    event: &'a str,
    data: Cow<'a, str>,
    retry: u64,
}

impl<'a> Frame<'a> {
    /// Build a record.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidField`] if `event` is empty or contains
    /// a line break.
    pub fn new(
        id: &'a str,
        event: &'a str,
        data: impl Into<Cow<'a, str>>,
        retry: u64,
    ) -> StreamResult<Self> {
        if event.is_empty() {
            return Err(StreamError::invalid_field("event", "must not be empty"));
        }
        if event.contains(['\r', '\n']) {
            return Err(StreamError::invalid_field(
                "event",
                format!("{event:?} contains a line break"),
            ));
        }

        Ok(Self {
            id,
            event,
            data: data.into(),
            retry,
        })
    }

    /// The body chunks of this record, in write order.
    ///
    /// Field lines and separators are separate chunks, matching the
    /// [`Emitter::write_body_line`] contract of one non-empty chunk per call.
    pub fn body_lines(&self) -> Vec<Cow<'_, str>> {
        let mut lines = Vec::with_capacity(10);
        let mut field = |name: &str, value: &str| {
            lines.push(Cow::Owned(format!("{name}: {value}")));
            lines.push(Cow::Borrowed(LINE_SEPARATOR));
        };

        field("id", self.id);
        field("event", self.event);
        if self.data.contains(['\r', '\n']) {
            let normalized = self.data.replace("\r\n", "\n").replace('\r', "\n");
            for line in normalized.split('\n') {
                field("data", line);
            }
        } else {
            field("data", &self.data);
        }
        field("retry", &self.retry.to_string());

        lines.push(Cow::Borrowed(LINE_SEPARATOR));
        lines
    }

    /// Encode the whole record to a string.
    pub fn encode(&self) -> String {
        self.body_lines().concat()
    }

    /// Write the record through an emitter, one chunk per call.
    ///
    /// # Errors
    ///
    /// Propagates any failure reported by the emitter.
    pub fn write_to<E: Emitter + ?Sized>(&self, emitter: &mut E) -> StreamResult<()> {
        for line in self.body_lines() {
            emitter.write_body_line(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_simple_record() {
        let frame = Frame::new("foo", "foo", "baz", 100).unwrap();
        assert_eq!(frame.encode(), "id: foo\nevent: foo\ndata: baz\nretry: 100\n\n");
    }

    #[test]
    fn test_empty_data_keeps_field() {
        let frame = Frame::new("foo", "done", "", 50).unwrap();
        assert_eq!(frame.encode(), "id: foo\nevent: done\ndata: \nretry: 50\n\n");
    }

    #[test]
    fn test_multiline_data_is_split() {
        let frame = Frame::new("1", "log", "first\r\nsecond\nthird", 10).unwrap();
        assert_eq!(
            frame.encode(),
            "id: 1\nevent: log\ndata: first\ndata: second\ndata: third\nretry: 10\n\n"
        );
    }

    #[test]
    fn test_lone_carriage_return_splits_data() {
        let frame = Frame::new("1", "log", "a\rb\n", 10).unwrap();
        assert_eq!(
            frame.encode(),
            "id: 1\nevent: log\ndata: a\ndata: b\ndata: \nretry: 10\n\n"
        );
    }

    #[test]
    fn test_body_lines_alternate_with_separators() {
        let frame = Frame::new("a", "b", "c", 1).unwrap();
        let lines = frame.body_lines();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "id: a");
        assert_eq!(lines[1], LINE_SEPARATOR);
        assert_eq!(lines[7], LINE_SEPARATOR);
        assert_eq!(lines[8], LINE_SEPARATOR);
        assert!(lines.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn test_rejects_empty_event() {
        let err = Frame::new("a", "", "c", 1).unwrap_err();
        assert!(matches!(err, StreamError::InvalidField { field: "event", .. }));
    }

    #[test]
    fn test_rejects_multiline_event() {
        assert!(Frame::new("a", "x\ny", "c", 1).is_err());
        assert!(Frame::new("a", "x\ry", "c", 1).is_err());
    }
}
