//! Command-line front end for the sitetrust scoring engine.
//!
//! Runs the probe fan-out directly and scores from network signals alone
//! (no vote store is consulted), which makes it a handy way to sanity-check
//! what the API would see for a host.

mod output;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sitetrust_core::scoring::{self, CommunityParams};
use sitetrust_core::normalize_host;
use sitetrust_probes::threat::extract_api_key;
use sitetrust_probes::ProbeOrchestrator;

#[derive(Parser)]
#[command(
    name = "sitetrust",
    version,
    about = "Score the trustworthiness of an internet host"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Probe a host and print its trust score (network signals only)
    Score {
        host: String,
        /// Emit the raw score record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Probe a host and dump every raw signal
    Explain {
        host: String,
        /// Emit the signal list as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments and dispatch.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Score { host, json } => score(&host, json).await,
        Command::Explain { host, json } => explain(&host, json).await,
    }
}

async fn score(host: &str, json: bool) -> Result<()> {
    let host = normalize_host(host)?;
    let bundle = orchestrator_from_env().collect(&host).await;
    let record = scoring::score_site(&host, &[], &bundle, &CommunityParams::default(), Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        output::print_record(&record);
    }
    Ok(())
}

async fn explain(host: &str, json: bool) -> Result<()> {
    let host = normalize_host(host)?;
    let bundle = orchestrator_from_env().collect(&host).await;
    let signals = bundle.signals();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = signals.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        output::print_signals(&host, &signals);
    }
    Ok(())
}

fn orchestrator_from_env() -> ProbeOrchestrator {
    let api_key = std::env::var("SAFE_BROWSING_API_KEY")
        .ok()
        .as_deref()
        .and_then(extract_api_key);
    ProbeOrchestrator::new(api_key)
}
