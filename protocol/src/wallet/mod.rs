//! # Wallet Derivation
//!
//! Deterministic seeds, recovery phrases, and the generator that turns
//! them (or imported keys) into addresses.

pub mod generator;
pub mod mnemonic;
pub mod seed;

pub use generator::{
    derive_keypair, from_inputs, from_mnemonic, from_seed_inputs, generate, generate_batch,
    import_private_key, DerivationMethod, GeneratedWallet, ImportedWallet, PredeterminedWallet,
};
pub use mnemonic::{MnemonicError, WalletMnemonic};
pub use seed::{build_seed, ContextLabel, DerivedSeed, SeedError, SeedInputs};
