mod api_client;
mod commands;
mod config;
mod dashboard;
mod errors;
mod models;
mod state;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::commands::{alert, Cli};
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("jobhunter v{} -> {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let client = ApiClient::new(&config.api_url, config.timeout_secs.map(Duration::from_secs))?;
    let state = AppState { client, config };

    if let Err(e) = commands::run(cli.command, state).await {
        error!("{e:?}");
        alert(&format!("{e:#}"));
        std::process::exit(1);
    }

    Ok(())
}
