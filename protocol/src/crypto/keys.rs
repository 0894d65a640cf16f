//! # Key Management
//!
//! Ed25519 keypair construction for Sui accounts.
//!
//! A keypair here is a pure function of its 32-byte seed: the seed is hashed
//! with SHA-512, the lower half is clamped into the secret scalar, and the
//! public key is that scalar times the curve's base point (RFC 8032 §5.1.5).
//! ed25519-dalek does all of that for us. Same seed in, same public key out,
//! on every machine, forever.
//!
//! ## Security considerations
//!
//! - Seed material is zeroized on drop (thanks, ed25519-dalek).
//! - `Debug` prints the public key only.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{PUBLIC_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::scheme::SignatureScheme;

/// Errors that can occur during key operations.
///
/// These never carry key material, only lengths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid seed length: expected {expected} bytes, got {got}")]
    InvalidSeedLength { expected: usize, got: usize },

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("invalid signature bytes: expected 64 bytes")]
    InvalidSignature,

    #[error("key material is not valid hex")]
    InvalidHex,
}

/// An Ed25519 keypair for a Sui account.
///
/// `SuiKeypair` intentionally does NOT implement `Serialize`. Exporting a
/// private key is a deliberate act: use
/// [`encode_private_key`](crate::identity::encode_private_key).
///
/// # Examples
///
/// ```
/// use keyforge_protocol::crypto::keys::SuiKeypair;
///
/// let kp = SuiKeypair::from_seed(&[7u8; 32]);
/// let msg = b"claim allowlist slot";
/// let sig = kp.sign(msg);
/// assert!(kp.verify(msg, &sig));
/// ```
pub struct SuiKeypair {
    signing_key: SigningKey,
}

/// The public half of a Sui Ed25519 keypair. Serializes as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiPublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// A 64-byte Ed25519 signature. Deterministic for a given (key, message).
#[derive(Clone, PartialEq, Eq)]
pub struct SuiSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl SuiKeypair {
    /// Derive a keypair from a 32-byte seed. Never touches an RNG.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Derive a keypair from a seed slice of unchecked length.
    ///
    /// Anything but exactly 32 bytes is an internal invariant violation
    /// upstream, and is reported as such instead of being padded or
    /// truncated into a plausible-looking key.
    pub fn from_seed_slice(seed: &[u8]) -> Result<Self, KeyError> {
        let seed: &[u8; SEED_LENGTH] =
            seed.try_into().map_err(|_| KeyError::InvalidSeedLength {
                expected: SEED_LENGTH,
                got: seed.len(),
            })?;
        Ok(Self::from_seed(seed))
    }

    /// Reconstruct a keypair from a hex-encoded seed (optional `0x` prefix).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(trimmed).map_err(|_| KeyError::InvalidHex)?;
        Self::from_seed_slice(&bytes)
    }

    /// Generate a fresh keypair from the OS cryptographic RNG.
    ///
    /// This is the only non-deterministic constructor and nothing on the
    /// predetermined-wallet path calls it.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// The signature scheme of this keypair. Always Ed25519.
    pub fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    /// Returns the public key associated with this keypair.
    pub fn public_key(&self) -> SuiPublicKey {
        SuiPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Sign a message. Deterministic per RFC 8032.
    pub fn sign(&self, message: &[u8]) -> SuiSignature {
        SuiSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }

    /// Verify a signature against this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &SuiSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Exports the raw 32-byte seed.
    ///
    /// **Handle with extreme care.** Whoever holds these bytes owns the
    /// account. Don't log them, don't return them from an HTTP handler.
    pub fn seed_bytes(&self) -> [u8; SEED_LENGTH] {
        self.signing_key.to_bytes()
    }
}

impl fmt::Debug for SuiKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material in debug output. Not even "partially."
        write!(f, "SuiKeypair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for SuiKeypair {
    /// Keypairs compare by public key; secret bytes are never compared.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for SuiKeypair {}

// ---------------------------------------------------------------------------
// SuiPublicKey
// ---------------------------------------------------------------------------

impl SuiPublicKey {
    /// Create a `SuiPublicKey` from raw bytes without point validation.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Try to create a `SuiPublicKey` from a byte slice.
    ///
    /// Validates the length and that the bytes decompress to a curve point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded public key (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Hex-encoded representation. 64 characters for 32 bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Verify a signature against this public key.
    ///
    /// Uses strict verification; invalid points simply fail.
    pub fn verify(&self, message: &[u8], signature: &SuiSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let dalek_sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify_strict(message, &dalek_sig).is_ok()
    }
}

impl fmt::Display for SuiPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for SuiPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiPublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for SuiPublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SuiPublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SuiSignature
// ---------------------------------------------------------------------------

impl SuiSignature {
    /// Create a signature from its raw 64-byte representation.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Parse a signature from a byte slice of unchecked length.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes = slice.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded signature (optional `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|_| KeyError::InvalidSignature)?;
        Self::try_from_slice(&bytes)
    }

    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// Hex-encoded signature. 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for SuiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for SuiSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "SuiSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
