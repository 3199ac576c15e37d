//! # Multichain Session CLI
//!
//! Restores the wallet session from the JSON store, runs one command and
//! prints the resulting status as JSON.
//!
//! ```text
//! ms-session status
//! ms-session switch solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1
//! ms-session connector WALLET_CONNECT
//! ms-session reset eip155
//! ```
//!
//! Logs go to stdout at `warn` unless `MS_LOG_LEVEL` or `RUST_LOG` say
//! otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use session_runtime::{Cli, RuntimeConfig, SessionRuntime};
use session_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _telemetry =
        init_telemetry(TelemetryConfig::for_cli()).context("Failed to initialize telemetry")?;

    let mut config = RuntimeConfig::load().context("Failed to load runtime configuration")?;
    if let Some(path) = cli.storage {
        config = config.with_storage_path(path);
    }

    let runtime = SessionRuntime::new(config).context("Failed to open session")?;

    let mut status_rx = runtime.public_state().subscribe();
    let observer = tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let status = status_rx.borrow_and_update().clone();
            debug!(?status, "Public status changed");
        }
    });

    runtime.start().context("Session bring-up failed")?;
    let report = runtime.execute(cli.command).context("Command failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    // Dropping the runtime closes the status channel, which ends the observer
    drop(runtime);
    observer.await.context("Status observer failed")?;

    Ok(())
}
