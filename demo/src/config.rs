//! Demo configuration.
//!
//! Loaded from an optional file, then overridden by `TURBOSSE_*` environment
//! variables, then by command-line flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use turbosse::StreamConfig;

use crate::cli::ServeArgs;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Unsupported file format
    #[error("Unsupported configuration file format. Use .toml, .yaml, .yml, or .json")]
    UnsupportedFormat,

    /// Configuration parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] config::ConfigError),
}

/// Settings for the demo server and the feeds it serves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Address to bind.
    pub bind: String,

    /// Tick events per feed, before the closing `done` record.
    pub event_count: u32,

    /// Pause between realtime events in milliseconds.
    pub interval_ms: u64,

    /// Per-stream settings. `stream.id` is ignored; every feed gets a fresh id.
    pub stream: StreamConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            event_count: 5,
            interval_ms: 1_000,
            stream: StreamConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a file (TOML, YAML, or JSON)
    ///
    /// Environment variables with the `TURBOSSE_` prefix override file
    /// settings; use `__` for nested keys (`TURBOSSE_STREAM__RETRY_MILLIS`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The file format is unsupported
    /// - The file contains invalid configuration
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("yaml" | "yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => return Err(ConfigError::UnsupportedFormat),
        };
        let path = path.to_str().ok_or(ConfigError::UnsupportedFormat)?;

        Self::build(Some((path, format)))
    }

    /// Load configuration from defaults and environment variables only.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override has the wrong type.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    fn build(file: Option<(&str, config::FileFormat)>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some((path, format)) = file {
            builder = builder.add_source(config::File::new(path, format));
        }

        let config = builder
            // Environment variables override file settings (12-factor app pattern)
            .add_source(
                config::Environment::with_prefix("TURBOSSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Apply command-line overrides.
    pub fn apply(mut self, args: &ServeArgs) -> Self {
        if let Some(bind) = &args.bind {
            self.bind.clone_from(bind);
        }
        if let Some(events) = args.events {
            self.event_count = events;
        }
        if let Some(interval_ms) = args.interval_ms {
            self.interval_ms = interval_ms;
        }
        if let Some(retry_ms) = args.retry_ms {
            self.stream.retry_millis = retry_ms;
        }
        self
    }

    /// Stream settings for one new feed.
    pub fn feed_stream_config(&self) -> StreamConfig {
        StreamConfig::new().with_retry_millis(self.stream.retry_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml() {
        let file = write_config(
            ".toml",
            r#"
            bind = "0.0.0.0:9000"
            event_count = 2

            [stream]
            retry_millis = 1500
            "#,
        );

        let config = DemoConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.event_count, 2);
        assert_eq!(config.interval_ms, 1_000);
        assert_eq!(config.stream.retry_millis, 1_500);
    }

    #[test]
    fn test_load_json() {
        let file = write_config(".json", r#"{"interval_ms": 10}"#);
        let config = DemoConfig::from_file(file.path()).unwrap();
        assert_eq!(config.interval_ms, 10);
        assert_eq!(config.stream.retry_millis, 50);
    }

    #[test]
    fn test_missing_file() {
        let err = DemoConfig::from_file("/nonexistent/turbosse.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".ini", "bind = x");
        let err = DemoConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat));
    }

    #[test]
    fn test_cli_overrides() {
        let args = ServeArgs {
            bind: Some("127.0.0.1:1".into()),
            events: Some(9),
            interval_ms: None,
            retry_ms: Some(75),
        };
        let config = DemoConfig::default().apply(&args);
        assert_eq!(config.bind, "127.0.0.1:1");
        assert_eq!(config.event_count, 9);
        assert_eq!(config.interval_ms, 1_000);
        assert_eq!(config.stream.retry_millis, 75);
    }

    #[test]
    fn test_feed_stream_config_drops_fixed_id() {
        let mut config = DemoConfig::default();
        config.stream = StreamConfig::new().with_id("shared").with_retry_millis(10);
        let feed = config.feed_stream_config();
        assert_eq!(feed.id, None);
        assert_eq!(feed.retry_millis, 10);
    }
}
