//! # Encoded Private Keys
//!
//! Sui wallets export private keys as Bech32 strings with the `suiprivkey`
//! human-readable part:
//!
//! ```text
//! flag (1 byte) || seed (32 bytes)
//!     -> Bech32("suiprivkey", payload) -> suiprivkey1qzwkrvvaal745c96...
//! ```
//!
//! Decoding is strict and ordered: prefix, then Bech32 checksum, then
//! padding, then payload length, then scheme flag. Each step has its own error so a
//! malformed key never turns into a plausible-looking wrong address.
//!
//! Note that Sui uses classic Bech32 (BIP-173), not Bech32m. A string with a
//! valid Bech32m checksum over the same data is a checksum mismatch here.

use bech32::primitives::decode::{CheckedHrpstring, CheckedHrpstringError};
use bech32::{Bech32, Hrp};
use std::fmt;
use thiserror::Error;

use crate::config::{ENCODED_KEY_PAYLOAD_LENGTH, PRIVATE_KEY_HRP, PRIVATE_KEY_PREFIX, SEED_LENGTH};
use crate::crypto::keys::SuiKeypair;
use crate::crypto::scheme::SignatureScheme;

const SUI_PRIVKEY_HRP: Hrp = Hrp::parse_unchecked(PRIVATE_KEY_HRP);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while decoding an encoded private key.
///
/// None of these carry any part of the input string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyDecodeError {
    /// Missing `suiprivkey1` prefix, or the payload is not valid Bech32.
    #[error("invalid private key format: {0}")]
    InvalidFormat(&'static str),

    /// The Bech32 checksum does not match the decoded data.
    #[error("private key checksum mismatch")]
    ChecksumMismatch,

    /// The decoded payload is not exactly flag + 32-byte seed.
    #[error("invalid private key length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of payload bytes.
        expected: usize,
        /// Actual number of payload bytes.
        got: usize,
    },

    /// The flag byte names a scheme keyforge cannot build keypairs for.
    #[error("unsupported signature scheme flag 0x{0:02x}")]
    UnsupportedScheme(u8),

    /// The payload could not be Bech32-encoded.
    #[error("private key could not be encoded")]
    Encoding,
}

// ---------------------------------------------------------------------------
// DecodedKeyMaterial
// ---------------------------------------------------------------------------

/// A decoded private key: scheme plus raw 32-byte seed.
///
/// Only ever constructed for supported schemes, so turning it into a
/// keypair cannot fail.
pub struct DecodedKeyMaterial {
    scheme: SignatureScheme,
    seed: [u8; SEED_LENGTH],
}

impl DecodedKeyMaterial {
    /// The signature scheme named by the flag byte.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// The raw seed. Treat exactly like the private key it is.
    pub fn seed(&self) -> &[u8; SEED_LENGTH] {
        &self.seed
    }

    /// Build the Ed25519 keypair this material describes.
    pub fn keypair(&self) -> SuiKeypair {
        SuiKeypair::from_seed(&self.seed)
    }
}

impl fmt::Debug for DecodedKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecodedKeyMaterial(scheme={}, seed=<redacted>)", self.scheme)
    }
}

// ---------------------------------------------------------------------------
// Decode / Encode
// ---------------------------------------------------------------------------

/// Decode a `suiprivkey1…` string into its scheme and seed.
///
/// # Example
///
/// ```
/// use keyforge_protocol::identity::decode_private_key;
/// use keyforge_protocol::crypto::SignatureScheme;
///
/// let decoded = decode_private_key(
///     "suiprivkey1qzwkrvvaal745c96s390fyhv9nzygjw9d9any6gewqa6cqcu4elkqqfr3zg",
/// ).unwrap();
/// assert_eq!(decoded.scheme(), SignatureScheme::Ed25519);
/// ```
pub fn decode_private_key(encoded: &str) -> Result<DecodedKeyMaterial, KeyDecodeError> {
    if !encoded.starts_with(PRIVATE_KEY_PREFIX) {
        return Err(KeyDecodeError::InvalidFormat("missing suiprivkey1 prefix"));
    }

    let checked = CheckedHrpstring::new::<Bech32>(encoded).map_err(|e| match e {
        CheckedHrpstringError::Checksum(_) => KeyDecodeError::ChecksumMismatch,
        _ => KeyDecodeError::InvalidFormat("payload is not valid bech32"),
    })?;

    // A '1' inside the data part would move the separator, so re-check.
    if checked.hrp() != SUI_PRIVKEY_HRP {
        return Err(KeyDecodeError::InvalidFormat("unexpected human-readable part"));
    }

    // byte_iter drops trailing bits silently; more than 4, or any nonzero, is a second spelling.
    checked
        .validate_segwit_padding()
        .map_err(|_| KeyDecodeError::InvalidFormat("non-canonical padding"))?;

    let payload: Vec<u8> = checked.byte_iter().collect();
    if payload.len() != ENCODED_KEY_PAYLOAD_LENGTH {
        return Err(KeyDecodeError::InvalidLength {
            expected: ENCODED_KEY_PAYLOAD_LENGTH,
            got: payload.len(),
        });
    }

    let flag = payload[0];
    let scheme = SignatureScheme::from_flag(flag)
        .filter(|s| s.is_supported())
        .ok_or(KeyDecodeError::UnsupportedScheme(flag))?;

    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(&payload[1..]);

    tracing::trace!(scheme = %scheme, "decoded private key");
    Ok(DecodedKeyMaterial { scheme, seed })
}

/// Encode a keypair as a `suiprivkey1…` string.
///
/// Inverse of [`decode_private_key`]. The result is the secret; don't log it.
pub fn encode_private_key(keypair: &SuiKeypair) -> Result<String, KeyDecodeError> {
    let mut payload = [0u8; ENCODED_KEY_PAYLOAD_LENGTH];
    payload[0] = keypair.scheme().flag();
    payload[1..].copy_from_slice(&keypair.seed_bytes());
    bech32::encode::<Bech32>(SUI_PRIVKEY_HRP, &payload)
        .map_err(|_| KeyDecodeError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 8032 TEST 1 seed, flag 0x00, encoded independently.
    const VALID_KEY: &str = "suiprivkey1qzwkrvvaal745c96s390fyhv9nzygjw9d9any6gewqa6cqcu4elkqqfr3zg";
    const VALID_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    /// Same seed under the secp256k1 flag.
    const SECP256K1_KEY: &str =
        "suiprivkey1qxwkrvvaal745c96s390fyhv9nzygjw9d9any6gewqa6cqcu4elkq6kkwpl";

    /// Flag plus only 31 seed bytes.
    const SHORT_KEY: &str = "suiprivkey1qzwkrvvaal745c96s390fyhv9nzygjw9d9any6gewqa6cqcu4elsg4pvnw";

    /// VALID_KEY with one extra zero symbol before a fresh checksum: 54 data
    /// symbols carry 270 bits, so 6 bits of padding instead of 1.
    const OVERPADDED_KEY: &str =
        "suiprivkey1qzwkrvvaal745c96s390fyhv9nzygjw9d9any6gewqa6cqcu4elkqqfr3zfp";

    /// Valid Bech32 under the wrong HRP.
    const WRONG_HRP_KEY: &str =
        "suiprivkez1qzwkrvvaal745c96s390fyhv9nzygjw9d9any6gewqa6cqcu4elkqrygnh4";

    const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

    #[test]
    fn decodes_known_vector() {
        let decoded = decode_private_key(VALID_KEY).unwrap();
        assert_eq!(decoded.scheme(), SignatureScheme::Ed25519);
        assert_eq!(hex::encode(decoded.seed()), VALID_SEED);
    }

    #[test]
    fn decoding_is_stable() {
        let a = decode_private_key(VALID_KEY).unwrap();
        let b = decode_private_key(VALID_KEY).unwrap();
        assert_eq!(a.seed(), b.seed());
        assert_eq!(a.scheme(), b.scheme());
    }

    #[test]
    fn encode_reproduces_known_vector() {
        let kp = SuiKeypair::from_hex(VALID_SEED).unwrap();
        assert_eq!(encode_private_key(&kp).unwrap(), VALID_KEY);
    }

    #[test]
    fn generated_key_survives_export_and_import() {
        let kp = SuiKeypair::generate();
        let decoded = decode_private_key(&encode_private_key(&kp).unwrap()).unwrap();
        assert_eq!(decoded.keypair(), kp);
    }

    #[test]
    fn altered_prefix_is_invalid_format() {
        for bad in [
            VALID_KEY.replacen("suiprivkey1", "suiprivkez1", 1),
            VALID_KEY.replacen("suiprivkey1", "SUIPRIVKEY1", 1),
            VALID_KEY.replacen("suiprivkey1", "suiprivatekey1", 1),
            VALID_KEY.replacen("suiprivkey1", "", 1),
            WRONG_HRP_KEY.to_string(),
        ] {
            assert!(
                matches!(decode_private_key(&bad), Err(KeyDecodeError::InvalidFormat(_))),
                "expected InvalidFormat for {bad}"
            );
        }
    }

    #[test]
    fn every_single_character_mutation_is_rejected() {
        let original = VALID_KEY.as_bytes();
        for i in 0..original.len() {
            let mut mutated = original.to_vec();
            let pos = BECH32_CHARSET
                .iter()
                .position(|&c| c == original[i])
                .unwrap_or(0);
            let replacement = BECH32_CHARSET[(pos + 1) % BECH32_CHARSET.len()];
            mutated[i] = if replacement == original[i] {
                b'q'
            } else {
                replacement
            };
            let mutated = String::from_utf8(mutated).unwrap();
            assert_ne!(mutated, VALID_KEY);

            let result = decode_private_key(&mutated);
            assert!(
                matches!(
                    result,
                    Err(KeyDecodeError::ChecksumMismatch) | Err(KeyDecodeError::InvalidFormat(_))
                ),
                "mutation at index {i} was not rejected: {result:?}"
            );
        }
    }

    #[test]
    fn non_bech32_character_is_invalid_format() {
        let mut bad = VALID_KEY.to_string();
        bad.replace_range(20..21, "b");
        assert!(matches!(
            decode_private_key(&bad),
            Err(KeyDecodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn bech32m_checksum_is_rejected() {
        let payload = {
            let mut p = vec![0u8];
            p.extend_from_slice(&hex::decode(VALID_SEED).unwrap());
            p
        };
        let encoded = bech32::encode::<bech32::Bech32m>(SUI_PRIVKEY_HRP, &payload).unwrap();
        assert_eq!(
            decode_private_key(&encoded).unwrap_err(),
            KeyDecodeError::ChecksumMismatch
        );
    }

    #[test]
    fn overlong_padding_is_invalid_format() {
        assert_eq!(
            decode_private_key(OVERPADDED_KEY).unwrap_err(),
            KeyDecodeError::InvalidFormat("non-canonical padding")
        );
    }

    #[test]
    fn nonzero_padding_is_invalid_format() {
        use bech32::{ByteIterExt, Fe32, Fe32IterExt};

        // 53 symbols carry 265 bits; the last symbol's low bit is padding.
        let mut symbols: Vec<Fe32> = {
            let mut p = vec![0u8];
            p.extend_from_slice(&hex::decode(VALID_SEED).unwrap());
            p.into_iter().bytes_to_fes().collect()
        };
        let last = symbols.len() - 1;
        symbols[last] = Fe32::try_from(symbols[last].to_u8() | 1).unwrap();

        let encoded: String = symbols
            .into_iter()
            .with_checksum::<Bech32>(&SUI_PRIVKEY_HRP)
            .chars()
            .collect();
        assert!(encoded.starts_with(PRIVATE_KEY_PREFIX));
        assert_ne!(encoded, VALID_KEY);
        assert_eq!(
            decode_private_key(&encoded).unwrap_err(),
            KeyDecodeError::InvalidFormat("non-canonical padding")
        );
    }

    #[test]
    fn short_payload_is_invalid_length() {
        assert_eq!(
            decode_private_key(SHORT_KEY).unwrap_err(),
            KeyDecodeError::InvalidLength {
                expected: 33,
                got: 32
            }
        );
    }

    #[test]
    fn secp256k1_flag_is_unsupported() {
        assert_eq!(
            decode_private_key(SECP256K1_KEY).unwrap_err(),
            KeyDecodeError::UnsupportedScheme(0x01)
        );
    }

    #[test]
    fn unknown_flag_is_unsupported() {
        let mut payload = [0u8; 33];
        payload[0] = 0x7f;
        let encoded = bech32::encode::<Bech32>(SUI_PRIVKEY_HRP, &payload).unwrap();
        assert_eq!(
            decode_private_key(&encoded).unwrap_err(),
            KeyDecodeError::UnsupportedScheme(0x7f)
        );
    }

    #[test]
    fn debug_redacts_seed() {
        let decoded = decode_private_key(VALID_KEY).unwrap();
        let debug_str = format!("{decoded:?}");
        assert!(debug_str.contains("redacted"));
        assert!(!debug_str.contains(VALID_SEED));
    }
}
