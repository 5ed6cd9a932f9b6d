//! Request Signature Utility
//!
//! Prints the `X-App-Access-Sig` value for a request, for debugging signature
//! mismatches against the provider.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin sign_request -- \
//!   --secret "$KYC_APP_SECRET" \
//!   --method POST \
//!   --path '/resources/applicants?levelName=basic' \
//!   --body '{"externalUserId":"u1","levelName":"basic"}' \
//!   --timestamp 1700000000
//! ```
//!
//! The signature goes to stdout; the timestamp used goes to stderr as `TIMESTAMP:<ts>`.

use anyhow::{Context, Result};
use clap::Parser;
use kyc_connector::{config::APP_SECRET_ENV, Clock, HttpMethod, SignedRequest, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sign_request")]
#[command(about = "Compute the HMAC signature for a provider API request")]
struct Args {
    /// Application secret (falls back to KYC_APP_SECRET)
    #[arg(long)]
    secret: Option<String>,

    /// HTTP method
    #[arg(long)]
    method: String,

    /// Request target including query string, e.g. /resources/applicants/<id>/one
    #[arg(long)]
    path: String,

    /// Exact body bytes to be sent (omit for requests without a body)
    #[arg(long, default_value = "")]
    body: String,

    /// Unix timestamp in seconds (default: now)
    #[arg(long)]
    timestamp: Option<i64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let secret = match args.secret {
        Some(secret) => secret,
        None => std::env::var(APP_SECRET_ENV)
            .context("--secret is required when KYC_APP_SECRET is not set")?,
    };
    if !args.path.starts_with('/') {
        anyhow::bail!("--path must start with '/' and must not include scheme or host");
    }
    let method: HttpMethod = args.method.parse()?;
    let timestamp = args.timestamp.unwrap_or_else(|| SystemClock.now_secs());

    let signed = SignedRequest::new(&secret, timestamp, method, args.path, args.body);

    println!("{}", signed.signature);
    eprintln!("TIMESTAMP:{}", signed.timestamp);

    Ok(())
}
