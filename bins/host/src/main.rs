//! LP ledger host
//!
//! Replays a JSON-lines command script against an in-memory ledger and
//! prints one outcome per command on stdout.
//!
//! Usage: `lpledger [SCRIPT]` (reads stdin when no script is given).

mod command;
mod replay;

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use lpledger_core::LpLedger;
use lpledger_shared::AppConfig;
use lpledger_shared::config::LoggingConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let mut ledger = LpLedger::with_allowed_callers(
        config.ledger.owner,
        config.ledger.allowed_callers.iter().copied(),
    )
    .context("Invalid ledger configuration")?;
    info!(
        owner = %config.ledger.owner,
        allowed_callers = config.ledger.allowed_callers.len(),
        "Ledger initialized"
    );

    let stdout = io::stdout().lock();
    let summary = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {path}"))?;
            info!(script = %path, "Replaying script");
            replay::run(&mut ledger, BufReader::new(file), stdout)?
        }
        None => {
            info!("Replaying script from stdin");
            replay::run(&mut ledger, io::stdin().lock(), stdout)?
        }
    };

    info!(
        applied = summary.applied,
        answered = summary.answered,
        rejected = summary.rejected,
        accounts = ledger.accounts().len(),
        "Replay finished"
    );

    Ok(())
}

/// Logs go to stderr so that stdout carries only outcomes.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let layer = if logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
