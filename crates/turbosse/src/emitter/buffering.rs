//! Emitter that assembles an `http::Response` in memory.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};

use super::Emitter;
use crate::error::{StreamError, StreamResult};

/// Accumulates headers and body into a response the caller returns.
///
/// Nothing reaches a transport until the caller hands the response to its
/// HTTP framework, so [`flush`](Emitter::flush) does nothing and
/// [`headers_sent`](Emitter::headers_sent) is always `false`.
#[derive(Clone, Debug, Default)]
pub struct BufferingEmitter {
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferingEmitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Headers registered so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body written so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Build a `200 OK` response from a snapshot of the current output.
    pub fn to_response(&self) -> Response<Bytes> {
        Self::build(self.headers.clone(), Bytes::copy_from_slice(&self.body))
    }

    /// Build a `200 OK` response, consuming the emitter.
    pub fn into_response(self) -> Response<Bytes> {
        Self::build(self.headers, self.body.freeze())
    }

    fn build(headers: HeaderMap, body: Bytes) -> Response<Bytes> {
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::OK;
        *response.headers_mut() = headers;
        response
    }
}

impl Emitter for BufferingEmitter {
    fn set_header(&mut self, name: &str, value: &str) -> StreamResult<()> {
        if name.is_empty() {
            return Err(StreamError::invalid_header("header name must not be empty"));
        }
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(())
    }

    fn headers_sent(&self) -> bool {
        false
    }

    fn write_body_line(&mut self, line: &str) -> StreamResult<()> {
        self.body.extend_from_slice(line.as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> StreamResult<()> {
        Ok(())
    }
}
