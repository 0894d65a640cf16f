//! # Digital Signatures
//!
//! Ed25519 signing and verification for the "prove you control this
//! address" half of the predetermined-wallet story. A recipient who later
//! authenticates re-derives the same keypair, signs a challenge, and the
//! boundary checks it here.
//!
//! Verification uses `verify_strict`, which rejects small-order public keys
//! and non-canonical signatures that lenient implementations let through.

use thiserror::Error;

use super::keys::{KeyError, SuiKeypair, SuiPublicKey, SuiSignature};

/// Errors during signature operations.
///
/// Intentionally vague. We don't tell callers *why* verification failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("malformed signature input: {0}")]
    Malformed(#[from] KeyError),
}

/// Sign a message with a keypair.
///
/// # Example
///
/// ```
/// use keyforge_protocol::crypto::{SuiKeypair, sign, verify};
///
/// let keypair = SuiKeypair::from_seed(&[1u8; 32]);
/// let signature = sign(&keypair, b"I own this address");
/// assert!(verify(&keypair.public_key(), b"I own this address", &signature));
/// ```
pub fn sign(keypair: &SuiKeypair, message: &[u8]) -> SuiSignature {
    keypair.sign(message)
}

/// Verify a signature against a public key and message.
pub fn verify(public_key: &SuiPublicKey, message: &[u8], signature: &SuiSignature) -> bool {
    public_key.verify(message, signature)
}

/// Verify hex-encoded inputs straight off the wire.
///
/// Returns `Err(Malformed)` when either input fails to parse, and
/// `Err(VerificationFailed)` when it parses but doesn't verify.
pub fn verify_hex(
    public_key_hex: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<(), SignatureError> {
    let public_key = SuiPublicKey::from_hex(public_key_hex)?;
    let signature = SuiSignature::from_hex(signature_hex)?;
    if verify(&public_key, message, &signature) {
        Ok(())
    } else {
        Err(SignatureError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let kp = SuiKeypair::generate();
        let msg = b"hello, sui";
        let sig = sign(&kp, msg);
        assert!(verify(&kp.public_key(), msg, &sig));
    }

    #[test]
    fn test_wrong_message_fails() {
        let kp = SuiKeypair::generate();
        let sig = sign(&kp, b"correct message");
        assert!(!verify(&kp.public_key(), b"wrong message", &sig));
    }

    #[test]
    fn verify_hex_accepts_valid_signature() {
        let kp = SuiKeypair::generate();
        let sig = sign(&kp, b"challenge-123");
        assert!(verify_hex(&kp.public_key().to_hex(), b"challenge-123", &sig.to_hex()).is_ok());
    }

    #[test]
    fn verify_hex_rejects_wrong_key() {
        let kp1 = SuiKeypair::generate();
        let kp2 = SuiKeypair::generate();
        let sig = sign(&kp1, b"challenge");
        assert_eq!(
            verify_hex(&kp2.public_key().to_hex(), b"challenge", &sig.to_hex()),
            Err(SignatureError::VerificationFailed)
        );
    }

    #[test]
    fn verify_hex_rejects_malformed_input() {
        let kp = SuiKeypair::generate();
        let sig = sign(&kp, b"m");
        assert!(matches!(
            verify_hex("zz", b"m", &sig.to_hex()),
            Err(SignatureError::Malformed(_))
        ));
        assert!(matches!(
            verify_hex(&kp.public_key().to_hex(), b"m", "abcd"),
            Err(SignatureError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_message() {
        let kp = SuiKeypair::generate();
        let sig = sign(&kp, b"");
        assert!(verify(&kp.public_key(), b"", &sig));
    }
}
