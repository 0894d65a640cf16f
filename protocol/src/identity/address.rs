//! # Sui Addresses
//!
//! An address is the BLAKE2b-256 digest of the scheme flag followed by the
//! public key, written as `0x` plus 64 lowercase hex characters:
//!
//! ```text
//! flag (1 byte) || public_key (32 bytes)
//!     -> BLAKE2b-256 -> 32 bytes
//!     -> "0x" || hex -> 0x304af458e90e97c8...
//! ```
//!
//! The flag is part of the preimage so that the same 32 bytes interpreted
//! under two different schemes can never land on the same address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ADDRESS_LENGTH, ADDRESS_PREFIX, ADDRESS_STRING_LENGTH};
use crate::crypto::hash::blake2b256;
use crate::crypto::keys::SuiPublicKey;
use crate::crypto::scheme::SignatureScheme;

/// Errors that can occur while parsing a textual address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must start with \"0x\"")]
    MissingPrefix,

    #[error("invalid address length: expected {expected} characters, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("address contains non-hex characters")]
    InvalidHex,
}

/// A 32-byte Sui account address.
///
/// # Examples
///
/// ```
/// use keyforge_protocol::crypto::SuiKeypair;
/// use keyforge_protocol::identity::SuiAddress;
///
/// let kp = SuiKeypair::from_seed(&[3u8; 32]);
/// let address = SuiAddress::from_public_key(&kp.public_key());
/// let text = address.to_string();
/// assert_eq!(text.len(), 66);
/// assert_eq!(text.parse::<SuiAddress>().unwrap(), address);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

impl SuiAddress {
    /// Derive the address of an Ed25519 public key.
    pub fn from_public_key(public_key: &SuiPublicKey) -> Self {
        Self::derive(SignatureScheme::Ed25519, public_key.as_bytes())
    }

    /// Derive an address from a scheme flag and raw public key bytes.
    pub fn derive(scheme: SignatureScheme, public_key: &[u8]) -> Self {
        Self(blake2b256(&[&[scheme.flag()][..], public_key]))
    }

    /// Wrap a raw 32-byte digest.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// The canonical `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("{ADDRESS_PREFIX}{}", hex::encode(self.0))
    }
}

impl FromStr for SuiAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or(AddressError::MissingPrefix)?;
        if s.len() != ADDRESS_STRING_LENGTH {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_STRING_LENGTH,
                got: s.len(),
            });
        }
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(body, &mut bytes).map_err(|_| AddressError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self.to_hex())
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::SuiKeypair;
    use std::collections::HashSet;

    #[test]
    fn rfc8032_public_key_address() {
        let pk = SuiPublicKey::from_hex(
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        )
        .unwrap();
        assert_eq!(
            SuiAddress::from_public_key(&pk).to_string(),
            "0x304af458e90e97c841685b8cbbc59b909f3e2cf150df590ada4c81452c29737d"
        );
    }

    #[test]
    fn address_is_deterministic() {
        let kp = SuiKeypair::generate();
        let a1 = SuiAddress::from_public_key(&kp.public_key());
        let a2 = SuiAddress::from_public_key(&kp.public_key());
        assert_eq!(a1, a2);
    }

    #[test]
    fn flag_is_part_of_preimage() {
        let pk = SuiKeypair::from_seed(&[5u8; 32]).public_key();
        let ed = SuiAddress::derive(SignatureScheme::Ed25519, pk.as_bytes());
        let k1 = SuiAddress::derive(SignatureScheme::Secp256k1, pk.as_bytes());
        assert_ne!(ed, k1);
    }

    #[test]
    fn format_invariant_holds_for_many_keys() {
        let mut seen = HashSet::new();
        for i in 0..=255u8 {
            let pk = SuiKeypair::from_seed(&[i; 32]).public_key();
            let text = SuiAddress::from_public_key(&pk).to_string();
            assert!(text.starts_with("0x"));
            assert_eq!(text.len(), ADDRESS_STRING_LENGTH);
            assert!(text[2..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert!(seen.insert(text));
        }
    }

    #[test]
    fn parse_roundtrip() {
        let pk = SuiKeypair::generate().public_key();
        let addr = SuiAddress::from_public_key(&pk);
        assert_eq!(addr.to_string().parse::<SuiAddress>().unwrap(), addr);
    }

    #[test]
    fn parse_rejects_malformed() {
        let good = SuiAddress::from_bytes([0xab; 32]).to_string();
        assert_eq!(
            good[2..].parse::<SuiAddress>().unwrap_err(),
            AddressError::MissingPrefix
        );
        assert!(matches!(
            good[..40].parse::<SuiAddress>(),
            Err(AddressError::InvalidLength { got: 40, .. })
        ));
        let not_hex = format!("0x{}", "g".repeat(64));
        assert_eq!(
            not_hex.parse::<SuiAddress>().unwrap_err(),
            AddressError::InvalidHex
        );
    }

    #[test]
    fn serde_json_uses_string_form() {
        let addr = SuiAddress::from_bytes([0x11; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "11".repeat(32)));
        let back: SuiAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
