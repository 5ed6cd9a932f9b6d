//! KYC Connector CLI
//!
//! Host adapter that reads a JSON array of item parameter objects, runs each one
//! against the provider API, and prints the JSON array of results on stdout.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin kyc-connector -- --config config/connector.toml --input items.json
//! ```
//!
//! Items can also be piped in:
//!
//! ```bash
//! echo '[{"operation":"getStatus","applicantId":"63e0..."}]' | \
//!   KYC_CONNECTOR_CONFIG_PATH=connector.toml cargo run --bin kyc-connector -- --continue-on-fail
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use kyc_connector::{ConnectorConfig, Executor, ItemParameters, SignedApiClient};
use serde_json::Value;
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kyc-connector")]
#[command(about = "Run KYC provider operations for a batch of input items")]
struct Args {
    /// Path to configuration file (default: config/connector.toml or KYC_CONNECTOR_CONFIG_PATH env var)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON file with an array of item parameter objects; "-" reads stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Replace failing items with {"error": ...} instead of aborting
    #[arg(long)]
    continue_on_fail: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first (before initializing logging)
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ConnectorConfig::load_from_path(args.config.as_deref())
        .context("Failed to load connector configuration")?;
    info!("Configuration loaded successfully");
    info!("API URL: {}", config.credentials.api_url);

    let items = read_items(&args.input)?;
    let client = SignedApiClient::from_config(&config)?;
    let executor = Executor::new(client).continue_on_fail(args.continue_on_fail);

    let results = executor.execute(&items).await?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{}", output);

    Ok(())
}

/// Read items from a file or stdin. A single object is treated as a one-item batch.
fn read_items(input: &str) -> Result<Vec<ItemParameters>> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read items from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read items from {}", input))?
    };

    let value: Value = serde_json::from_str(&content).context("Input is not valid JSON")?;
    let values = match value {
        Value::Array(values) => values,
        object @ Value::Object(_) => vec![object],
        _ => anyhow::bail!("Input must be a JSON array of objects or a single object"),
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            ItemParameters::from_value(value).with_context(|| format!("Invalid item {}", index))
        })
        .collect()
}
