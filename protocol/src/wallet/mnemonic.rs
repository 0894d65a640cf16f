//! # Recovery Phrases
//!
//! BIP-39 English phrases, stretched with an empty passphrase and walked
//! down Sui's SLIP-0010 path:
//!
//! ```text
//! phrase -> PBKDF2-HMAC-SHA512("mnemonic", 2048) -> 64-byte seed
//!        -> SLIP-0010 m/44'/784'/0'/0'/0' -> Ed25519 seed -> keypair
//! ```
//!
//! Any Sui wallet that imports the same phrase lands on the same address.

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::{
    BIP39_SEED_LENGTH, MNEMONIC_ENTROPY_LENGTH, MNEMONIC_WORD_COUNTS, SUI_DERIVATION_PATH,
};
use crate::crypto::derivation::{derive_ed25519_seed, DerivationError};
use crate::crypto::keys::SuiKeypair;

/// Errors raised while generating or parsing a recovery phrase.
///
/// None of these carry a word from the phrase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MnemonicError {
    #[error("recovery phrase must have 12, 15, 18, 21 or 24 words, got {0}")]
    InvalidWordCount(usize),

    /// 1-based position of the first word outside the English wordlist.
    #[error("recovery phrase word #{0} is not in the BIP-39 English wordlist")]
    UnknownWord(usize),

    #[error("recovery phrase checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid recovery phrase")]
    Invalid,

    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

impl From<bip39::Error> for MnemonicError {
    fn from(err: bip39::Error) -> Self {
        match err {
            bip39::Error::BadWordCount(n) => Self::InvalidWordCount(n),
            bip39::Error::UnknownWord(i) => Self::UnknownWord(i + 1),
            bip39::Error::InvalidChecksum => Self::ChecksumMismatch,
            _ => Self::Invalid,
        }
    }
}

/// A validated recovery phrase and the seed it stretches into.
///
/// Both are wiped on drop. `Debug` shows neither.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    seed: [u8; BIP39_SEED_LENGTH],
}

impl WalletMnemonic {
    /// Draw a fresh 12-word phrase from the OS RNG.
    pub fn generate() -> Result<Self, MnemonicError> {
        let mut entropy = Zeroizing::new([0u8; MNEMONIC_ENTROPY_LENGTH]);
        OsRng.fill_bytes(entropy.as_mut_slice());
        let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy.as_slice())?;
        Ok(Self::from_mnemonic(&mnemonic))
    }

    /// Validate a phrase typed or pasted by a user.
    ///
    /// Runs of whitespace collapse to one space; words and checksum must
    /// be valid BIP-39 English.
    pub fn from_phrase(phrase: &str) -> Result<Self, MnemonicError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if !MNEMONIC_WORD_COUNTS.contains(&words.len()) {
            return Err(MnemonicError::InvalidWordCount(words.len()));
        }

        let normalized = Zeroizing::new(words.join(" "));
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)?;
        Ok(Self::from_mnemonic(&mnemonic))
    }

    fn from_mnemonic(mnemonic: &Mnemonic) -> Self {
        Self {
            phrase: mnemonic.to_string(),
            seed: mnemonic.to_seed_normalized(""),
        }
    }

    /// The phrase, words separated by single spaces. This is the secret.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split(' ').count()
    }

    /// The keypair at Sui's default account path.
    pub fn keypair(&self) -> Result<SuiKeypair, MnemonicError> {
        let seed = derive_ed25519_seed(&self.seed, SUI_DERIVATION_PATH)?;
        Ok(SuiKeypair::from_seed(&seed))
    }
}

impl fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::address::SuiAddress;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    #[test]
    fn known_phrase_derives_known_address() {
        let mnemonic = WalletMnemonic::from_phrase(ABANDON).unwrap();
        assert_eq!(
            hex::encode(mnemonic.seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );

        let keypair = mnemonic.keypair().unwrap();
        assert_eq!(
            hex::encode(keypair.seed_bytes()),
            "8869cb07178bf67e08d7c4abdf45487dbf379c9a452fcec2836854bf4a3d29b0"
        );
        assert_eq!(
            keypair.public_key().to_hex(),
            "900b4d81eecea3df2f74b14200c4f4cf3f49afaca7a634ffd2cf6ff82bdaecf2"
        );
        assert_eq!(
            SuiAddress::from_public_key(&keypair.public_key()).to_string(),
            "0x5e93a736d04fbb25737aa40bee40171ef79f65fae833749e3c089fe7cc2161f1"
        );
    }

    #[test]
    fn whitespace_is_normalized() {
        let messy = format!("  {}\n", ABANDON.replace(' ', "\t "));
        let a = WalletMnemonic::from_phrase(ABANDON).unwrap();
        let b = WalletMnemonic::from_phrase(&messy).unwrap();
        assert_eq!(a.phrase(), b.phrase());
        assert_eq!(a.keypair().unwrap(), b.keypair().unwrap());
    }

    #[test]
    fn generated_phrase_has_twelve_words_and_recovers() {
        let generated = WalletMnemonic::generate().unwrap();
        assert_eq!(generated.word_count(), 12);

        let recovered = WalletMnemonic::from_phrase(generated.phrase()).unwrap();
        assert_eq!(generated.keypair().unwrap(), recovered.keypair().unwrap());
    }

    #[test]
    fn wrong_word_count_rejected() {
        let eleven = ABANDON.rsplit_once(' ').unwrap().0;
        assert_eq!(
            WalletMnemonic::from_phrase(eleven).unwrap_err(),
            MnemonicError::InvalidWordCount(11)
        );
        assert_eq!(
            WalletMnemonic::from_phrase("").unwrap_err(),
            MnemonicError::InvalidWordCount(0)
        );
    }

    #[test]
    fn unknown_word_reports_position_only() {
        let phrase = ABANDON.replacen("abandon", "keyforge", 1);
        let err = WalletMnemonic::from_phrase(&phrase).unwrap_err();
        assert_eq!(err, MnemonicError::UnknownWord(1));
        assert!(!err.to_string().contains("keyforge"));
    }

    #[test]
    fn bad_checksum_rejected() {
        let phrase = ABANDON.replace("about", "abandon");
        assert_eq!(
            WalletMnemonic::from_phrase(&phrase).unwrap_err(),
            MnemonicError::ChecksumMismatch
        );
    }

    #[test]
    fn debug_redacts_phrase() {
        let mnemonic = WalletMnemonic::from_phrase(ABANDON).unwrap();
        let debug_str = format!("{mnemonic:?}");
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("abandon"));
    }
}
