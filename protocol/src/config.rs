//! # Protocol Configuration & Constants
//!
//! Every magic number in keyforge lives here. If you're hardcoding a prefix
//! or a flag byte somewhere else, you're doing it wrong.
//!
//! Most of these values are dictated by the Sui network. Changing them
//! doesn't make keyforge "different", it makes keyforge produce addresses
//! nobody on-chain will ever recognize. The exceptions are the seed domain
//! tag and the method tags, which are ours; changing those orphans every
//! predetermined address computed so far.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full version string of the derivation protocol.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Private Key Encoding
// ---------------------------------------------------------------------------

/// Bech32 human-readable part for exported Sui private keys.
pub const PRIVATE_KEY_HRP: &str = "suiprivkey";

/// Literal prefix every encoded private key starts with (HRP + separator).
pub const PRIVATE_KEY_PREFIX: &str = "suiprivkey1";

/// Decoded payload length: one scheme flag byte followed by the seed.
pub const ENCODED_KEY_PAYLOAD_LENGTH: usize = 1 + SEED_LENGTH;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 seed length in bytes. The seed *is* the secret key.
pub const SEED_LENGTH: usize = 32;

/// Public (verifying) key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Sui signature scheme flag for Ed25519.
pub const ED25519_FLAG: u8 = 0x00;

/// Sui signature scheme flag for ECDSA over secp256k1.
pub const SECP256K1_FLAG: u8 = 0x01;

/// Sui signature scheme flag for ECDSA over secp256r1.
pub const SECP256R1_FLAG: u8 = 0x02;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Literal prefix of every textual address.
pub const ADDRESS_PREFIX: &str = "0x";

/// Address digest length in bytes (BLAKE2b-256 output).
pub const ADDRESS_LENGTH: usize = 32;

/// Length of the textual address: prefix plus two hex chars per byte.
pub const ADDRESS_STRING_LENGTH: usize = ADDRESS_PREFIX.len() + ADDRESS_LENGTH * 2;

// ---------------------------------------------------------------------------
// Deterministic Derivation
// ---------------------------------------------------------------------------

/// Domain tag absorbed first into every predetermined-wallet seed.
///
/// Bumping the `/v1` suffix produces an entirely new address space.
pub const SEED_DOMAIN_TAG: &[u8] = b"keyforge/predetermined-wallet/v1";

/// Hex length of a SHA-256 email digest.
pub const HASHED_EMAIL_HEX_LENGTH: usize = 64;

/// Context label for wallets pre-registered on a contract allowlist.
pub const CONTEXT_ALLOWLIST_CREATION: &str = "allowlist-creation";

/// Method tag reported for addresses derived from non-secret inputs.
pub const METHOD_DETERMINISTIC: &str = "deterministic-seed-v1";

/// Method tag reported for wallets derived from a BIP-39 recovery phrase.
pub const METHOD_MNEMONIC: &str = "bip39-slip10-v1";

// ---------------------------------------------------------------------------
// Recovery Phrases
// ---------------------------------------------------------------------------

/// Sui's default Ed25519 account path. Every segment is hardened.
pub const SUI_DERIVATION_PATH: &str = "m/44'/784'/0'/0'/0'";

/// HMAC key for the SLIP-0010 Ed25519 master node.
pub const SLIP10_ED25519_KEY: &[u8] = b"ed25519 seed";

/// Entropy drawn for a fresh phrase. 16 bytes is 12 words.
pub const MNEMONIC_ENTROPY_LENGTH: usize = 16;

/// Phrase lengths accepted on recovery.
pub const MNEMONIC_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Length of the PBKDF2 output a phrase stretches into.
pub const BIP39_SEED_LENGTH: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_hrp_plus_separator() {
        assert_eq!(PRIVATE_KEY_PREFIX, format!("{PRIVATE_KEY_HRP}1"));
    }

    #[test]
    fn address_string_length_is_66() {
        assert_eq!(ADDRESS_STRING_LENGTH, 66);
    }

    #[test]
    fn sui_path_uses_coin_type_784() {
        assert!(SUI_DERIVATION_PATH.starts_with("m/44'/784'/"));
        assert!(SUI_DERIVATION_PATH.split('/').skip(1).all(|s| s.ends_with('\'')));
    }

    #[test]
    fn scheme_flags_are_distinct() {
        assert_ne!(ED25519_FLAG, SECP256K1_FLAG);
        assert_ne!(ED25519_FLAG, SECP256R1_FLAG);
        assert_ne!(SECP256K1_FLAG, SECP256R1_FLAG);
    }
}
