//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Demo host for TurboSSE event streams
#[derive(Parser, Debug)]
#[command(
    name = "turbosse-demo",
    version,
    about = "Serve a ticking Server-Sent Events feed",
    long_about = "Serves GET /events as a Server-Sent Events feed.\n\
                  `buffered` assembles the whole feed into one response inside an axum server.\n\
                  `realtime` writes each record to the socket as it is produced.\n\n\
                  Try it with: curl -N -H 'Accept: text/event-stream' http://127.0.0.1:8080/events"
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (.toml, .yaml, .yml or .json)
    #[arg(long, short = 'c', global = true, env = "TURBOSSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Serving modes
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build each feed as a buffered response (axum)
    Buffered(ServeArgs),

    /// Stream each record as soon as it is produced (blocking TCP)
    Realtime(ServeArgs),
}

/// Overrides applied on top of the loaded configuration
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind, e.g. 127.0.0.1:8080
    #[arg(long)]
    pub bind: Option<String>,

    /// Number of tick events per feed
    #[arg(long)]
    pub events: Option<u32>,

    /// Pause between realtime events in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Retry interval advertised to clients in milliseconds
    #[arg(long)]
    pub retry_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_realtime_overrides() {
        let cli = Cli::try_parse_from([
            "turbosse-demo",
            "realtime",
            "--bind",
            "0.0.0.0:9000",
            "--events",
            "3",
            "--retry-ms",
            "250",
        ])
        .unwrap();

        match cli.command {
            Commands::Realtime(args) => {
                assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
                assert_eq!(args.events, Some(3));
                assert_eq!(args.retry_ms, Some(250));
                assert_eq!(args.interval_ms, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.log_level, "info");
    }
}
