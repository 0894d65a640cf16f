//! # Signature Schemes
//!
//! Sui tags every key and every address preimage with a one-byte flag that
//! names the signature algorithm. keyforge recognizes the three flags Sui
//! assigns to single-key schemes, but only implements Ed25519. The others
//! exist so we can say "that's a secp256k1 key, and we don't do those"
//! instead of "that's garbage".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{ED25519_FLAG, SECP256K1_FLAG, SECP256R1_FLAG};

/// A Sui signature scheme, identified by its flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureScheme {
    /// Ed25519 (flag `0x00`). The only scheme keyforge can sign with.
    Ed25519,
    /// ECDSA over secp256k1 (flag `0x01`).
    Secp256k1,
    /// ECDSA over secp256r1 / P-256 (flag `0x02`).
    Secp256r1,
}

impl SignatureScheme {
    /// Map a flag byte to a known scheme. Returns `None` for anything else.
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            ED25519_FLAG => Some(Self::Ed25519),
            SECP256K1_FLAG => Some(Self::Secp256k1),
            SECP256R1_FLAG => Some(Self::Secp256r1),
            _ => None,
        }
    }

    /// The flag byte for this scheme.
    pub fn flag(self) -> u8 {
        match self {
            Self::Ed25519 => ED25519_FLAG,
            Self::Secp256k1 => SECP256K1_FLAG,
            Self::Secp256r1 => SECP256R1_FLAG,
        }
    }

    /// Whether keyforge can build keypairs for this scheme.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Ed25519)
    }

    /// Lowercase scheme name, as used in API responses.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
            Self::Secp256r1 => "secp256r1",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_roundtrip() {
        for scheme in [
            SignatureScheme::Ed25519,
            SignatureScheme::Secp256k1,
            SignatureScheme::Secp256r1,
        ] {
            assert_eq!(SignatureScheme::from_flag(scheme.flag()), Some(scheme));
        }
    }

    #[test]
    fn unknown_flag_is_none() {
        assert_eq!(SignatureScheme::from_flag(0x03), None);
        assert_eq!(SignatureScheme::from_flag(0xFF), None);
    }

    #[test]
    fn only_ed25519_supported() {
        assert!(SignatureScheme::Ed25519.is_supported());
        assert!(!SignatureScheme::Secp256k1.is_supported());
        assert!(!SignatureScheme::Secp256r1.is_supported());
    }
}
