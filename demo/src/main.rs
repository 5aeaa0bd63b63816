//! TurboSSE demo host
//!
//! Serves a ticking Server-Sent Events feed on `GET /events`, either as a
//! buffered axum response or streamed record by record over a raw socket.

mod buffered;
mod cli;
mod config;
mod feed;
mod realtime;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::DemoConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays free for piping
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base = match &cli.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::from_env()?,
    };

    match &cli.command {
        Commands::Buffered(args) => {
            let config = base.apply(args);
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(buffered::serve(config))
        }
        Commands::Realtime(args) => realtime::serve(base.apply(args)),
    }
}
