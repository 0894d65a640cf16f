//! Error types for keyforge wallet operations.
//!
//! Each component has its own error enum. [`WalletError`] aggregates them for
//! the orchestration layer, and [`ErrorKind`] collapses them into the four
//! categories a boundary needs to pick a response status. Matching on
//! `ErrorKind` is exhaustive: add a category here and every boundary stops
//! compiling until it decides what to do with it.

use thiserror::Error;

use crate::crypto::keys::KeyError;
use crate::identity::private_key::KeyDecodeError;
use crate::wallet::mnemonic::MnemonicError;
use crate::wallet::seed::SeedError;

/// The closed failure taxonomy for wallet operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or empty field, malformed email digest, unknown context,
    /// malformed public key or signature, bad recovery phrase.
    InputValidation,
    /// Bad prefix, bad checksum, bad padding, or wrong payload length on an
    /// encoded key.
    Decode,
    /// A well-formed key for a scheme we can't build keypairs for.
    UnsupportedScheme,
    /// A seed of the wrong length reached the keypair factory. Unreachable
    /// through the public decode and seed paths.
    InvalidSeedLength,
}

impl ErrorKind {
    /// Whether the caller supplied the bad input (as opposed to us).
    pub fn is_client_error(self) -> bool {
        !matches!(self, Self::InvalidSeedLength)
    }
}

/// Any failure from the wallet orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Decode(#[from] KeyDecodeError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),
}

impl WalletError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Seed(_) => ErrorKind::InputValidation,
            Self::Decode(KeyDecodeError::UnsupportedScheme(_)) => ErrorKind::UnsupportedScheme,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Key(KeyError::InvalidSeedLength { .. }) => ErrorKind::InvalidSeedLength,
            Self::Key(_) => ErrorKind::InputValidation,
            Self::Mnemonic(_) => ErrorKind::InputValidation,
        }
    }
}

/// Convenience alias used throughout the wallet module.
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(
            WalletError::from(SeedError::InvalidContext("x".into())).kind(),
            ErrorKind::InputValidation
        );
        assert_eq!(
            WalletError::from(KeyDecodeError::ChecksumMismatch).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            WalletError::from(KeyDecodeError::InvalidFormat("x")).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            WalletError::from(KeyDecodeError::UnsupportedScheme(1)).kind(),
            ErrorKind::UnsupportedScheme
        );
        assert_eq!(
            WalletError::from(KeyError::InvalidSeedLength {
                expected: 32,
                got: 31
            })
            .kind(),
            ErrorKind::InvalidSeedLength
        );
        assert_eq!(
            WalletError::from(MnemonicError::ChecksumMismatch).kind(),
            ErrorKind::InputValidation
        );
    }

    #[test]
    fn only_seed_length_is_server_side() {
        assert!(ErrorKind::InputValidation.is_client_error());
        assert!(ErrorKind::Decode.is_client_error());
        assert!(ErrorKind::UnsupportedScheme.is_client_error());
        assert!(!ErrorKind::InvalidSeedLength.is_client_error());
    }

    #[test]
    fn messages_pass_through() {
        let err = WalletError::from(KeyDecodeError::ChecksumMismatch);
        assert_eq!(err.to_string(), "private key checksum mismatch");
    }
}
