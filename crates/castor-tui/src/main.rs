//! Castor terminal client entry point.

use std::{fs::File, path::PathBuf, sync::Arc};

use castor_tui::{ClientConfig, Runtime};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Castor mock conferencing room
#[derive(Parser, Debug)]
#[command(name = "castor")]
#[command(about = "Terminal client for a simulated video-conferencing room")]
#[command(version)]
struct Args {
    /// Display name
    #[arg(short, long, default_value = "")]
    name: String,

    /// Server URL for /create. Leave blank or use "auto" for demo mode.
    #[arg(short, long, default_value = "auto")]
    server: String,

    /// Room code to join on startup
    #[arg(short, long)]
    join: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file. The terminal is owned by the UI, so logs
    /// are discarded without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = Arc::new(File::create(path)?);
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_ansi(false))
            .with(filter)
            .init();
    }

    let config = ClientConfig {
        name: args.name,
        server: args.server,
        join: args.join,
        ..ClientConfig::default()
    };

    Ok(Runtime::new(config).run().await?)
}
