//! Tradepost replay CLI
//!
//! Reads a JSON scenario, drives it through a fresh market, and prints the
//! final state as JSON on stdout. Logs go to stderr; `RUST_LOG` sets the
//! filter.

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tradepost_types::constants;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "tradepost-replay")]
#[command(about = "Replay a Tradepost scenario and print the resulting state")]
#[command(version)]
struct Cli {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Only print the state digest
    #[arg(long)]
    digest_only: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        scenario = %cli.scenario.display(),
        "Replay starting"
    );

    let text = std::fs::read_to_string(&cli.scenario)
        .with_context(|| format!("reading {}", cli.scenario.display()))?;
    let scenario = Scenario::from_json(&text)?;
    let report = scenario.replay()?;

    tracing::info!(
        applied = report.applied,
        rejected = report.rejected.len(),
        digest = %report.snapshot.digest,
        "Replay finished"
    );

    if cli.digest_only {
        println!("{}", report.snapshot.digest);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
