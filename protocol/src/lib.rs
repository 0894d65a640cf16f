// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # keyforge: Sui Key Handling Core
//!
//! Two problems, both pure functions:
//!
//! 1. Take a `suiprivkey1…` string somebody exported from a wallet and turn
//!    it back into a signing keypair and its `0x…` address.
//! 2. Take a hashed email, a contract id, and a context label, and derive
//!    the address that recipient *will* own, before they've ever logged in.
//!
//! ## Architecture
//!
//! - **crypto**: Ed25519 keypairs, signatures, BLAKE2b/SHA-256 hashing.
//! - **identity**: Encoded private keys and Sui addresses.
//! - **wallet**: Deterministic seed builder, recovery phrases, wallet generator.
//! - **error**: The closed failure taxonomy the boundary maps to statuses.
//! - **config**: Prefixes, flags, lengths, tags.
//!
//! ## Design Philosophy
//!
//! 1. No state. Every value is built, used, and dropped within one call.
//! 2. No randomness on the deterministic path. Ever.
//! 3. Malformed input fails loudly. It never becomes a wrong-but-plausible
//!    address.
//! 4. Secret bytes never reach a log line, an error message, or a `Debug`
//!    impl.

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod wallet;

pub use error::{ErrorKind, WalletError, WalletResult};
