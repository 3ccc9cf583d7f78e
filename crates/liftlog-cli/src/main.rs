//! LiftLog CLI Application
//!
//! Command-line interface over the LiftLog local data layer.

mod args;
mod cli;
mod handler;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handler::Handler;
use liftlog_core::{CancellationToken, DataStoreBuilder, RetryOptions};
use log::{info, warn};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        data_dir,
        no_color,
        retry,
        command,
    } = Args::parse();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning pending retries");
            on_interrupt.cancel();
        }
    });

    let data = DataStoreBuilder::new()
        .with_data_dir(data_dir)
        .with_retry_options(RetryOptions::from(retry))
        .with_cancellation(cancel)
        .build()
        .await
        .context("Failed to initialize data store")?;

    info!("LiftLog started");

    let handler = Handler::new(data, TerminalRenderer::new(!no_color));
    match command {
        Commands::Plan { command } => handler.handle_plan_command(command).await,
        Commands::Storage { command } => handler.handle_storage_command(command).await,
    }
}
