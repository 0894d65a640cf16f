//! # SLIP-0010 Ed25519 Derivation
//!
//! Walks a hardened path from a 64-byte BIP-39 seed down to a 32-byte
//! Ed25519 seed:
//!
//! ```text
//! master:  I = HMAC-SHA512(key = "ed25519 seed", data = seed)
//! child:   I = HMAC-SHA512(key = chain_code, data = 0x00 || key || be32(index | 2^31))
//!          key = I[..32], chain_code = I[32..]
//! ```
//!
//! Ed25519 has no public-parent derivation, so every segment must be
//! hardened (`44'` or `44h`). `m/44'/784'/0'/0'/0'` is what Sui wallets use.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{SEED_LENGTH, SLIP10_ED25519_KEY};

type HmacSha512 = Hmac<Sha512>;

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Errors raised while parsing a derivation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("derivation path must start with \"m/\"")]
    MissingRoot,

    #[error("derivation path has no segments")]
    EmptyPath,

    #[error("ed25519 derivation requires hardened segments, got {0:?}")]
    NotHardened(String),

    #[error("invalid derivation index {0:?}")]
    InvalidIndex(String),

    #[error("HMAC-SHA512 rejected the chain key")]
    InvalidChainKey,
}

/// One node of the derivation tree. Both halves are wiped on drop.
struct Node {
    key: Zeroizing<[u8; SEED_LENGTH]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl Node {
    fn master(seed: &[u8]) -> Result<Self, DerivationError> {
        Self::from_hmac(SLIP10_ED25519_KEY, &[seed])
    }

    fn child(&self, index: u32) -> Result<Self, DerivationError> {
        let index = (index | HARDENED_OFFSET).to_be_bytes();
        Self::from_hmac(
            self.chain_code.as_slice(),
            &[&[0x00], self.key.as_slice(), &index],
        )
    }

    fn from_hmac(key: &[u8], parts: &[&[u8]]) -> Result<Self, DerivationError> {
        let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
            .map_err(|_| DerivationError::InvalidChainKey)?;
        for part in parts {
            mac.update(part);
        }
        let output = mac.finalize().into_bytes();

        let mut node = Self {
            key: Zeroizing::new([0u8; SEED_LENGTH]),
            chain_code: Zeroizing::new([0u8; 32]),
        };
        node.key.copy_from_slice(&output[..32]);
        node.chain_code.copy_from_slice(&output[32..]);
        Ok(node)
    }
}

/// Parse `m/44'/784'/0'/0'/0'` into its raw (un-offset) indices.
pub fn parse_hardened_path(path: &str) -> Result<Vec<u32>, DerivationError> {
    let segments = path
        .trim()
        .strip_prefix("m/")
        .ok_or(DerivationError::MissingRoot)?;
    if segments.is_empty() {
        return Err(DerivationError::EmptyPath);
    }

    segments
        .split('/')
        .map(|segment| {
            let digits = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| DerivationError::NotHardened(segment.to_string()))?;
            digits
                .parse::<u32>()
                .ok()
                .filter(|index| *index < HARDENED_OFFSET)
                .ok_or_else(|| DerivationError::InvalidIndex(segment.to_string()))
        })
        .collect()
}

/// Derive the Ed25519 seed at `path` below a BIP-39 seed.
pub fn derive_ed25519_seed(
    seed: &[u8],
    path: &str,
) -> Result<Zeroizing<[u8; SEED_LENGTH]>, DerivationError> {
    let indices = parse_hardened_path(path)?;
    let node = indices
        .into_iter()
        .try_fold(Node::master(seed)?, |parent, index| parent.child(index))?;
    Ok(node.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SUI_DERIVATION_PATH;

    // SLIP-0010 test vector 1 for ed25519.
    const VECTOR_1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn slip10_master_vector() {
        let seed = hex::decode(VECTOR_1_SEED).unwrap();
        let master = Node::master(&seed).unwrap();
        assert_eq!(
            hex::encode(master.key.as_slice()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code.as_slice()),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn slip10_first_hardened_child_vector() {
        let seed = hex::decode(VECTOR_1_SEED).unwrap();
        let key = derive_ed25519_seed(&seed, "m/0'").unwrap();
        assert_eq!(
            hex::encode(key.as_slice()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn sui_path_parses() {
        assert_eq!(
            parse_hardened_path(SUI_DERIVATION_PATH).unwrap(),
            vec![44, 784, 0, 0, 0]
        );
        assert_eq!(parse_hardened_path("m/44h/784h/0h").unwrap(), vec![44, 784, 0]);
    }

    #[test]
    fn malformed_paths_rejected() {
        assert_eq!(
            parse_hardened_path("44'/784'").unwrap_err(),
            DerivationError::MissingRoot
        );
        assert_eq!(parse_hardened_path("m/").unwrap_err(), DerivationError::EmptyPath);
        assert_eq!(
            parse_hardened_path("m/44'/784'/0'/0'/0").unwrap_err(),
            DerivationError::NotHardened("0".into())
        );
        assert_eq!(
            parse_hardened_path("m/44'/x'").unwrap_err(),
            DerivationError::InvalidIndex("x'".into())
        );
        assert_eq!(
            parse_hardened_path("m/2147483648'").unwrap_err(),
            DerivationError::InvalidIndex("2147483648'".into())
        );
    }

    #[test]
    fn accounts_derive_distinct_keys() {
        let seed = [7u8; 64];
        let a = derive_ed25519_seed(&seed, "m/44'/784'/0'/0'/0'").unwrap();
        let b = derive_ed25519_seed(&seed, "m/44'/784'/1'/0'/0'").unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
    }
}
