//! # Cryptographic Primitives
//!
//! Thin, type-safe wrappers around audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for keypairs and signatures.
//! - **BLAKE2b-256** (`blake2`) for Sui addresses.
//! - **SHA-256** (`sha2`) for predetermined-wallet seeds.
//! - **SLIP-0010** (`hmac` + `sha2`) for recovery-phrase derivation.
//!
//! We don't roll our own. If you're tempted to optimize these functions,
//! please reconsider.

pub mod derivation;
pub mod hash;
pub mod keys;
pub mod scheme;
pub mod signatures;

pub use derivation::{derive_ed25519_seed, parse_hardened_path, DerivationError};
pub use hash::{blake2b256, sha256, sha256_hex};
pub use keys::{KeyError, SuiKeypair, SuiPublicKey, SuiSignature};
pub use scheme::SignatureScheme;
pub use signatures::{sign, verify, verify_hex, SignatureError};
