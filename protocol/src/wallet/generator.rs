//! # Wallet Generator
//!
//! Orchestrates the three derivation paths:
//!
//! | Path | Pipeline | Secret leaves the function? |
//! |------|----------|-----------------------------|
//! | predetermined | seed builder -> keypair -> address | no |
//! | import | key decoder -> keypair -> address | no |
//! | generate | OS RNG -> phrase -> SLIP-0010 -> keypair -> address | yes, phrase and `suiprivkey1…` |
//! | recover | phrase -> SLIP-0010 -> keypair -> address | yes, phrase and `suiprivkey1…` |
//!
//! The predetermined path is the reason this crate exists: a contract owner
//! can pre-register the address a recipient *will* have, before that
//! recipient ever logs in, and the recipient can later re-derive the same
//! keypair and prove control of it.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

use crate::config::{METHOD_DETERMINISTIC, METHOD_MNEMONIC};
use crate::crypto::keys::{SuiKeypair, SuiPublicKey};
use crate::crypto::scheme::SignatureScheme;
use crate::error::WalletResult;
use crate::identity::address::SuiAddress;
use crate::identity::private_key::{decode_private_key, encode_private_key};
use crate::wallet::mnemonic::WalletMnemonic;
use crate::wallet::seed::SeedInputs;

// ---------------------------------------------------------------------------
// DerivationMethod
// ---------------------------------------------------------------------------

/// Which derivation path produced an address. Reported for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivationMethod {
    /// Seed built from hashed email, contract id, and context.
    #[serde(rename = "deterministic-seed-v1")]
    DeterministicSeed,
    /// BIP-39 phrase walked down Sui's SLIP-0010 path.
    #[serde(rename = "bip39-slip10-v1")]
    Mnemonic,
}

impl DerivationMethod {
    /// The literal tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeterministicSeed => METHOD_DETERMINISTIC,
            Self::Mnemonic => METHOD_MNEMONIC,
        }
    }
}

impl fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A wallet address pre-computed from non-secret inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredeterminedWallet {
    pub address: SuiAddress,
    pub method: DerivationMethod,
    pub contract_id: String,
}

/// The public view of an imported private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedWallet {
    pub address: SuiAddress,
    pub public_key: SuiPublicKey,
    pub scheme: SignatureScheme,
}

/// A wallet backed by a recovery phrase, with its exportable private key.
///
/// Not `Serialize`. `Debug` redacts the key and the phrase, and the key
/// string is wiped on drop.
pub struct GeneratedWallet {
    pub address: SuiAddress,
    pub public_key: SuiPublicKey,
    pub method: DerivationMethod,
    pub private_key: String,
    pub mnemonic: WalletMnemonic,
}

impl fmt::Debug for GeneratedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedWallet")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("method", &self.method)
            .field("private_key", &"<redacted>")
            .field("mnemonic", &self.mnemonic)
            .finish()
    }
}

impl Drop for GeneratedWallet {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Derive the predetermined wallet for `(hashed_email, contract_id, context)`.
///
/// # Example
///
/// ```
/// use keyforge_protocol::crypto::sha256_hex;
/// use keyforge_protocol::wallet::from_inputs;
///
/// let email = sha256_hex(b"alice@example.com");
/// let a = from_inputs(&email, "contract-abc", "allowlist-creation").unwrap();
/// let b = from_inputs(&email, "contract-abc", "allowlist-creation").unwrap();
/// assert_eq!(a.address, b.address);
/// ```
pub fn from_inputs(
    hashed_email: &str,
    contract_id: &str,
    context: &str,
) -> WalletResult<PredeterminedWallet> {
    let inputs = SeedInputs::new(hashed_email, contract_id, context)?;
    from_seed_inputs(&inputs)
}

/// Derive the predetermined wallet for already-validated inputs.
pub fn from_seed_inputs(inputs: &SeedInputs) -> WalletResult<PredeterminedWallet> {
    let address = {
        let keypair = derive_keypair(inputs)?;
        SuiAddress::from_public_key(&keypair.public_key())
    };

    tracing::debug!(
        %address,
        contract_id = inputs.contract_id(),
        context = %inputs.context(),
        "derived predetermined wallet"
    );

    Ok(PredeterminedWallet {
        address,
        method: DerivationMethod::DeterministicSeed,
        contract_id: inputs.contract_id().to_string(),
    })
}

/// Re-derive the keypair behind a predetermined address.
///
/// This is what the recipient runs after authenticating, to sign with the
/// address that was registered for them.
pub fn derive_keypair(inputs: &SeedInputs) -> WalletResult<SuiKeypair> {
    let seed = inputs.derive_seed();
    Ok(SuiKeypair::from_seed_slice(seed.as_bytes())?)
}

/// Import an encoded `suiprivkey1…` key and report its public identity.
pub fn import_private_key(encoded: &str) -> WalletResult<ImportedWallet> {
    let decoded = decode_private_key(encoded)?;
    let keypair = decoded.keypair();
    let public_key = keypair.public_key();
    let address = SuiAddress::from_public_key(&public_key);

    tracing::debug!(%address, scheme = %decoded.scheme(), "imported private key");

    Ok(ImportedWallet {
        address,
        public_key,
        scheme: decoded.scheme(),
    })
}

/// Generate a brand-new wallet from a fresh 12-word phrase.
pub fn generate() -> WalletResult<GeneratedWallet> {
    let wallet = from_wallet_mnemonic(WalletMnemonic::generate()?)?;
    tracing::debug!(address = %wallet.address, "generated wallet");
    Ok(wallet)
}

/// Generate `count` independent wallets.
pub fn generate_batch(count: usize) -> WalletResult<Vec<GeneratedWallet>> {
    (0..count).map(|_| generate()).collect()
}

/// Recover the wallet a BIP-39 phrase controls at Sui's default path.
///
/// # Example
///
/// ```
/// use keyforge_protocol::wallet::from_mnemonic;
///
/// let wallet = from_mnemonic(
///     "abandon abandon abandon abandon abandon abandon \
///      abandon abandon abandon abandon abandon about",
/// ).unwrap();
/// assert_eq!(
///     wallet.address.to_string(),
///     "0x5e93a736d04fbb25737aa40bee40171ef79f65fae833749e3c089fe7cc2161f1",
/// );
/// ```
pub fn from_mnemonic(phrase: &str) -> WalletResult<GeneratedWallet> {
    let wallet = from_wallet_mnemonic(WalletMnemonic::from_phrase(phrase)?)?;
    tracing::debug!(address = %wallet.address, "recovered wallet from phrase");
    Ok(wallet)
}

fn from_wallet_mnemonic(mnemonic: WalletMnemonic) -> WalletResult<GeneratedWallet> {
    let keypair = mnemonic.keypair()?;
    let public_key = keypair.public_key();
    Ok(GeneratedWallet {
        address: SuiAddress::from_public_key(&public_key),
        public_key,
        method: DerivationMethod::Mnemonic,
        private_key: encode_private_key(&keypair)?,
        mnemonic,
    })
}
