//! roomchat TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Relay on localhost
//! roomchat-tui
//!
//! # Remote relay, form prefilled, logs to a file
//! roomchat-tui --endpoint ws://chat.example:8080 -u alice -r red --log-file roomchat.log
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use roomchat_client::{ControllerConfig, DEFAULT_ENDPOINT};
use roomchat_tui::Runtime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// roomchat terminal client
#[derive(Parser, Debug)]
#[command(name = "roomchat-tui")]
#[command(about = "Terminal client for roomchat relays")]
#[command(version)]
struct Args {
    /// Relay WebSocket endpoint
    #[arg(short, long, env = "ROOMCHAT_WS_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Prefill the username field
    #[arg(short, long, default_value = "")]
    username: String,

    /// Prefill the room ID field
    #[arg(short, long, default_value = "")]
    room: String,

    /// Relay announces nothing itself: skip leave frames and departure notices
    #[arg(long)]
    silent: bool,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    let config = if args.silent {
        ControllerConfig::silent(args.endpoint)
    } else {
        ControllerConfig::announced(args.endpoint)
    };

    tracing::info!(endpoint = %config.endpoint, silent = args.silent, "roomchat starting");

    let runtime = Runtime::new(config, &args.username, &args.room)?;

    Ok(runtime.run().await?)
}
