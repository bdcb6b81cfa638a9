//! services/client/src/bin/schemes_connect.rs

use clap::Parser;
use client_lib::{cli::Cli, commands, config::Config, error::ClientError, state::AppState};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(EnvFilter::new(config.log_level.to_string()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded");

    // --- 2. Wire Adapters ---
    let state = AppState::from_config(config)?;

    // --- 3. Run the Command ---
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&state, cli.command, &mut out).await
}
