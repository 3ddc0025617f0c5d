// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use certifier::{
    acm::AcmCertificateAuthority, constants::TOKIO_WORKER_THREADS, event::ProvisioningEvent,
    handler::Provisioner, route53::Route53DnsService, session::load_session,
};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CloudFormation custom resource provisioning ACM certificates with
/// Route 53 DNS validation.
///
/// Reads one provisioning event as JSON, runs the lifecycle handler once,
/// and writes the provisioning result as JSON to stdout. The process exits
/// non-zero when the result carries an error, which the invoking runtime
/// shim translates into a FAILED response.
#[derive(Parser)]
#[command(name = "certifier", version, about)]
struct Cli {
    /// Path to the provisioning event JSON, or '-' to read stdin
    #[arg(long, value_name = "PATH", default_value = "-")]
    event: PathBuf,
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("certifier")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging.
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug certifier --event event.json
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json certifier --event event.json
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();
    let event = read_event(&cli.event)?;
    info!("Starting certificate resource handler");

    // One session per invocation, acquired before any domain logic.
    let session = load_session().await;
    let provisioner = Provisioner::new(
        AcmCertificateAuthority::new(&session),
        Route53DnsService::new(&session),
    );

    let result = provisioner.handle(&event).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(error) = &result.error {
        anyhow::bail!("provisioning failed: {error}");
    }
    info!("Certificate resource handler finished successfully");
    Ok(())
}

/// Read and parse the provisioning event from a file or stdin.
fn read_event(path: &Path) -> Result<ProvisioningEvent> {
    let raw = if path.as_os_str() == "-" {
        debug!("reading provisioning event from stdin");
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read event from stdin")?;
        buffer
    } else {
        debug!(path = %path.display(), "reading provisioning event from file");
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file {}", path.display()))?
    };

    serde_json::from_str(&raw).context("failed to parse provisioning event JSON")
}
