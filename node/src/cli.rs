//! # CLI Interface
//!
//! Defines the command-line argument structure for `keyforge-node` using
//! `clap` derive. Seven subcommands: `serve`, `derive`, `import`, `generate`,
//! `recover`, `sign`, and `version`.
//!
//! Private keys and recovery phrases are never accepted as positional
//! arguments or flags. They'd end up in shell history and `ps` output.
//! `import` and `sign` read the key from `KEYFORGE_PRIVATE_KEY`, `recover`
//! reads the phrase from `KEYFORGE_MNEMONIC`, each falling back to the first
//! line of stdin.

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;

/// Environment variable consulted for an encoded private key.
pub const PRIVATE_KEY_ENV: &str = "KEYFORGE_PRIVATE_KEY";

/// Environment variable consulted for a recovery phrase.
pub const MNEMONIC_ENV: &str = "KEYFORGE_MNEMONIC";

/// Upper bound for `generate --count`.
pub const MAX_GENERATE_COUNT: usize = 100;

/// keyforge wallet gateway.
///
/// Derives predetermined Sui addresses from non-secret inputs, imports
/// exported Sui private keys, and verifies ownership signatures.
#[derive(Parser, Debug)]
#[command(
    name = "keyforge-node",
    about = "keyforge wallet derivation gateway",
    version,
    propagate_version = true
)]
pub struct KeyforgeCli {
    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "KEYFORGE_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the keyforge binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway and metrics endpoint.
    Serve(ServeArgs),
    /// Derive a predetermined wallet address.
    Derive(DeriveArgs),
    /// Import an encoded `suiprivkey1…` key and print its address.
    Import,
    /// Generate fresh wallets and print their recovery phrases and keys.
    Generate(GenerateArgs),
    /// Recover a wallet from a BIP-39 recovery phrase.
    Recover,
    /// Sign a message with an encoded private key.
    Sign(SignArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind both listeners on.
    #[arg(long, env = "KEYFORGE_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port for the REST API.
    #[arg(long, env = "KEYFORGE_PORT", default_value_t = 8787)]
    pub port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "KEYFORGE_METRICS_PORT", default_value_t = 8788)]
    pub metrics_port: u16,
}

/// Arguments for the `derive` subcommand.
#[derive(Args, Debug, Clone)]
pub struct DeriveArgs {
    /// Hex-encoded SHA-256 of the recipient's email (64 characters).
    #[arg(long)]
    pub hashed_email: String,

    /// Contract the address is being registered against.
    #[arg(long)]
    pub contract_id: String,

    /// Derivation context.
    #[arg(long, default_value = "allowlist-creation")]
    pub context: String,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of wallets to generate.
    #[arg(
        long,
        short = 'n',
        default_value_t = 1,
        value_parser = parse_count,
    )]
    pub count: usize,
}

fn parse_count(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    if (1..=MAX_GENERATE_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(format!("count must be between 1 and {MAX_GENERATE_COUNT}"))
    }
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// UTF-8 message to sign.
    #[arg(long, short = 'm')]
    pub message: String,
}
