//! Stream identifiers.

use std::fmt;

use crate::error::{StreamError, StreamResult};

/// Client-visible identifier of a stream, sent as the SSE `id` field.
///
/// Non-empty and free of `\r`, `\n` and `\0`. Assigned once and never changed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StreamId(String);

impl StreamId {
    /// Generate a random id (32 lowercase hex characters).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Validate and wrap a caller-supplied id.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidId`] if `id` is empty or contains a
    /// carriage return, line feed or NUL character.
    pub fn new(id: impl Into<String>) -> StreamResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(StreamError::InvalidId("id must not be empty".into()));
        }
        if id.contains(['\r', '\n', '\0']) {
            return Err(StreamError::InvalidId(format!(
                "{id:?} contains a line break or NUL character"
            )));
        }
        Ok(Self(id))
    }

    /// Use the supplied id, or generate one when absent.
    pub(crate) fn from_option(id: Option<String>) -> StreamResult<Self> {
        match id {
            Some(id) => Self::new(id),
            None => Ok(Self::generate()),
        }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StreamId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StreamId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_hex_and_unique() {
        let a = StreamId::generate();
        let b = StreamId::generate();
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(StreamId::new(""), Err(StreamError::InvalidId(_))));
    }

    #[test]
    fn test_rejects_line_breaks() {
        for bad in ["a\nb", "a\rb", "a\0b"] {
            assert!(StreamId::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_from_option() {
        assert_eq!(StreamId::from_option(Some("foo".into())).unwrap(), "foo");
        assert!(!StreamId::from_option(None).unwrap().as_str().is_empty());
    }
}
