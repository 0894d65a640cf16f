//! # Hashing Utilities
//!
//! Two hash functions, each with exactly one job:
//!
//! - **BLAKE2b-256**: Sui's address hash. Not our choice, and not
//!   negotiable. Any other function produces addresses the network has
//!   never heard of.
//!
//! - **SHA-256**: Seed derivation for predetermined wallets, and the
//!   digest callers are expected to apply to email addresses before they
//!   ever reach us.
//!
//! Both produce 32-byte digests, so everything downstream works on
//! `[u8; 32]` and never has to check a length.

use blake2::digest::consts::U32;
use blake2::Blake2b;
use sha2::{Digest, Sha256};

/// BLAKE2b with a 256-bit output, as used for Sui addresses.
pub type Blake2b256 = Blake2b<U32>;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use keyforge_protocol::crypto::sha256;
///
/// let hash = sha256(b"alice@example.com");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 of the input, hex-encoded. This is the `hashedEmail` format.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Compute the BLAKE2b-256 hash over the concatenation of `parts`.
///
/// Taking parts avoids allocating a scratch buffer for `flag || pubkey`.
pub fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256("") from FIPS 180-4.
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_hex_of_email() {
        assert_eq!(
            sha256_hex(b"alice@example.com"),
            "ff8d9819fc0e12bf0d24892e45987e249a28dce836a85cad60e28eaaa8c6d976"
        );
    }

    #[test]
    fn blake2b256_known_vector() {
        // BLAKE2b-256("") from the reference implementation.
        assert_eq!(
            hex::encode(blake2b256(&[])),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn blake2b256_parts_equal_concatenation() {
        let joined = blake2b256(&[b"hello world".as_slice()]);
        let split = blake2b256(&[b"hello".as_slice(), b" ", b"world"]);
        assert_eq!(joined, split);
    }
}
