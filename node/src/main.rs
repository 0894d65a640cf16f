// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # keyforge Node
//!
//! Entry point for the `keyforge-node` binary. Parses CLI arguments,
//! initializes logging, and either serves the HTTP API or runs a one-shot
//! key operation.
//!
//! The binary supports seven subcommands:
//!
//! - `serve`: start the REST API and metrics endpoint
//! - `derive`: print a predetermined wallet as JSON
//! - `import`: decode a `suiprivkey1…` key and print its address
//! - `generate`: create fresh wallets behind 12-word recovery phrases
//! - `recover`: rebuild a wallet from its recovery phrase
//! - `sign`: sign a message with a `suiprivkey1…` key
//! - `version`: print build version information

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

use keyforge_protocol::identity::decode_private_key;
use keyforge_protocol::wallet::{
    from_inputs, from_mnemonic, generate_batch, import_private_key, GeneratedWallet,
};

use cli::{Commands, KeyforgeCli, MNEMONIC_ENV, PRIVATE_KEY_ENV};
use logging::LogFormat;
use metrics::GatewayMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = KeyforgeCli::parse();
    logging::init_logging(
        logging::DEFAULT_DIRECTIVE,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Derive(args) => derive(args),
        Commands::Import => import(),
        Commands::Generate(args) => generate_wallets(args),
        Commands::Recover => recover(),
        Commands::Sign(args) => sign(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the REST API and the metrics endpoint on separate ports.
async fn serve(args: cli::ServeArgs) -> Result<()> {
    tracing::info!(
        bind = %args.bind,
        port = args.port,
        metrics_port = args.metrics_port,
        "starting keyforge-node"
    );

    // --- Metrics ---
    let gateway_metrics =
        Arc::new(GatewayMetrics::new().context("failed to register prometheus metrics")?);

    // --- Application state ---
    let app_state = api::AppState {
        version: format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            keyforge_protocol::config::PROTOCOL_VERSION,
        ),
        metrics: Arc::clone(&gateway_metrics),
    };

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = SocketAddr::new(args.bind, args.port);
    let api_listener = tokio::net::TcpListener::bind(api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {api_addr}"))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&gateway_metrics));
    let metrics_addr = SocketAddr::new(args.bind, args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {metrics_addr}"))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("keyforge-node stopped");
    Ok(())
}

/// Prints the predetermined wallet for the given inputs as JSON.
fn derive(args: cli::DeriveArgs) -> Result<()> {
    let wallet = from_inputs(&args.hashed_email, &args.contract_id, &args.context)
        .context("failed to derive predetermined wallet")?;
    println!("{}", serde_json::to_string_pretty(&wallet)?);
    Ok(())
}

/// Prints the public identity of a key read from env or stdin.
fn import() -> Result<()> {
    let encoded = read_secret(PRIVATE_KEY_ENV, "private key")?;
    let imported = import_private_key(&encoded).context("failed to import private key")?;
    println!("{}", serde_json::to_string_pretty(&imported)?);
    Ok(())
}

/// Generates `--count` wallets and prints them, secrets included.
fn generate_wallets(args: cli::GenerateArgs) -> Result<()> {
    let wallets = generate_batch(args.count).context("failed to generate wallets")?;
    tracing::info!(count = wallets.len(), "generated wallets");

    for (i, wallet) in wallets.iter().enumerate() {
        println!("Wallet #{}", i + 1);
        print_wallet(wallet);
        println!();
    }
    eprintln!("Store the recovery phrases offline. Anyone holding one controls the wallet.");
    Ok(())
}

/// Rebuilds a wallet from a phrase read from env or stdin.
fn recover() -> Result<()> {
    let phrase = read_secret(MNEMONIC_ENV, "recovery phrase")?;
    let wallet = from_mnemonic(&phrase).context("failed to recover wallet")?;
    tracing::info!(address = %wallet.address, "recovered wallet");

    println!("Wallet recovered.");
    print_wallet(&wallet);
    Ok(())
}

fn print_wallet(wallet: &GeneratedWallet) {
    println!("  Address     : {}", wallet.address);
    println!("  Public key  : {}", wallet.public_key);
    println!("  Method      : {}", wallet.method);
    println!("  Phrase      : {}", wallet.mnemonic.phrase());
    println!("  Private key : {}", wallet.private_key);
}

/// Signs `--message` with a key read from env or stdin.
fn sign(args: cli::SignArgs) -> Result<()> {
    let encoded = read_secret(PRIVATE_KEY_ENV, "private key")?;
    let keypair = decode_private_key(&encoded)
        .context("failed to decode private key")?
        .keypair();
    let signature = keypair.sign(args.message.as_bytes());

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "publicKey": keypair.public_key().to_hex(),
            "message": args.message,
            "signature": signature.to_hex(),
        }))?
    );
    Ok(())
}

/// Reads a secret from `env_var`, falling back to the first line of stdin.
fn read_secret(env_var: &str, what: &str) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("failed to read {what} from stdin"))?;
    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("no {what}: set {env_var} or pipe it on stdin");
    }
    Ok(value)
}

/// Prints version information to stdout.
fn print_version() {
    println!("keyforge-node {}", env!("CARGO_PKG_VERSION"));
    println!("protocol      {}", keyforge_protocol::config::PROTOCOL_VERSION);
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
