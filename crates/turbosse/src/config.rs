//! Configuration for event streams.

use serde::{Deserialize, Serialize};

/// Default reconnection delay advertised to clients, in milliseconds.
pub const DEFAULT_RETRY_MILLIS: u64 = 50;

/// Configuration for a single event stream.
///
/// Deserializable so a host application can embed it in its own config file:
///
/// ```toml
/// [stream]
/// retry_millis = 3000
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Stream id sent as the SSE `id` field.
    ///
    /// When `None` a random id is generated at construction.
    /// Default: `None`
    pub id: Option<String>,

    /// Reconnection delay advertised to the client (`retry` field).
    ///
    /// Default: 50 ms
    pub retry_millis: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            id: None,
            retry_millis: DEFAULT_RETRY_MILLIS,
        }
    }
}

impl StreamConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed stream id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the retry interval.
    pub fn with_retry_millis(mut self, retry_millis: u64) -> Self {
        self.retry_millis = retry_millis;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.id, None);
        assert_eq!(config.retry_millis, 50);
    }

    #[test]
    fn test_builder_pattern() {
        let config = StreamConfig::new().with_id("foo").with_retry_millis(100);
        assert_eq!(config.id.as_deref(), Some("foo"));
        assert_eq!(config.retry_millis, 100);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: StreamConfig = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(config.id.as_deref(), Some("abc"));
        assert_eq!(config.retry_millis, DEFAULT_RETRY_MILLIS);
    }
}
