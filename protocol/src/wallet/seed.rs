//! # Deterministic Seeds
//!
//! Turns three non-secret inputs into a 32-byte Ed25519 seed:
//!
//! ```text
//! SHA-256( lp(DOMAIN_TAG) || lp(email_digest) || lp(contract_id) || lp(context) )
//!
//! where lp(x) = u64_be(len(x)) || x
//! ```
//!
//! Every field is length-prefixed, so no two different input triples can
//! be re-partitioned into the same byte stream. The domain tag goes first
//! and carries a version suffix; nothing else in keyforge hashes under it.
//!
//! The email digest is hex-decoded before hashing, so `FF8D…` and `ff8d…`
//! name the same recipient.

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{
    CONTEXT_ALLOWLIST_CREATION, HASHED_EMAIL_HEX_LENGTH, SEED_DOMAIN_TAG, SEED_LENGTH,
};

/// Errors raised while validating seed inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// A required field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// `hashedEmail` is not a 64-character hex SHA-256 digest.
    #[error("hashedEmail must be a 64-character hex SHA-256 digest")]
    InvalidHashedEmail,

    /// `context` is not one of the recognized labels.
    #[error("invalid context: {0:?}")]
    InvalidContext(String),
}

// ---------------------------------------------------------------------------
// ContextLabel
// ---------------------------------------------------------------------------

/// The closed set of contexts a predetermined wallet can be derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextLabel {
    /// Pre-registering a recipient on a contract allowlist.
    AllowlistCreation,
}

impl ContextLabel {
    /// Every recognized label.
    pub const ALL: [ContextLabel; 1] = [ContextLabel::AllowlistCreation];

    /// The wire form of the label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllowlistCreation => CONTEXT_ALLOWLIST_CREATION,
        }
    }
}

impl FromStr for ContextLabel {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| SeedError::InvalidContext(s.to_string()))
    }
}

impl fmt::Display for ContextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SeedInputs / DerivedSeed
// ---------------------------------------------------------------------------

/// Validated inputs to the seed builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInputs {
    hashed_email: [u8; 32],
    contract_id: String,
    context: ContextLabel,
}

impl SeedInputs {
    /// Validate raw string inputs.
    ///
    /// Fails on any empty field, on a `hashed_email` that isn't 64 hex
    /// characters, and on an unrecognized `context`.
    pub fn new(hashed_email: &str, contract_id: &str, context: &str) -> Result<Self, SeedError> {
        if hashed_email.is_empty() {
            return Err(SeedError::MissingField("hashedEmail"));
        }
        if contract_id.is_empty() {
            return Err(SeedError::MissingField("contractId"));
        }
        if context.is_empty() {
            return Err(SeedError::MissingField("context"));
        }

        if hashed_email.len() != HASHED_EMAIL_HEX_LENGTH {
            return Err(SeedError::InvalidHashedEmail);
        }
        let mut digest = [0u8; 32];
        hex::decode_to_slice(hashed_email, &mut digest)
            .map_err(|_| SeedError::InvalidHashedEmail)?;

        Ok(Self {
            hashed_email: digest,
            contract_id: contract_id.to_string(),
            context: context.parse()?,
        })
    }

    /// The contract identifier, verbatim.
    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// The context label.
    pub fn context(&self) -> ContextLabel {
        self.context
    }

    /// Hash the inputs into a seed.
    pub fn derive_seed(&self) -> DerivedSeed {
        DerivedSeed(hash_fields(&[
            SEED_DOMAIN_TAG,
            self.hashed_email.as_slice(),
            self.contract_id.as_bytes(),
            self.context.as_str().as_bytes(),
        ]))
    }
}

/// A 32-byte seed derived from [`SeedInputs`].
///
/// As secret as any private key once someone knows the inputs. Not
/// `Clone`, wiped on drop, and `Debug` is redacted.
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedSeed([u8; SEED_LENGTH]);

impl DerivedSeed {
    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for DerivedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedSeed(<redacted>)")
    }
}

/// Validate the three inputs and build the seed in one call.
pub fn build_seed(
    hashed_email: &str,
    contract_id: &str,
    context: &str,
) -> Result<DerivedSeed, SeedError> {
    Ok(SeedInputs::new(hashed_email, contract_id, context)?.derive_seed())
}

/// SHA-256 over length-prefixed fields.
fn hash_fields(fields: &[&[u8]]) -> [u8; SEED_LENGTH] {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field);
    }
    hasher.finalize().into()
}
