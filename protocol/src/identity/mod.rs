//! # Identity Module
//!
//! The two textual faces of a Sui account:
//!
//! 1. **Encoded private key**: `suiprivkey1…`, Bech32 over flag + seed.
//!    What wallets export and what users paste in to import an account.
//! 2. **Address**: `0x…`, BLAKE2b-256 over flag + public key. What users
//!    see, share, and paste into allowlists.
//!
//! Both are pure functions of their input bytes. Nothing in this module
//! holds state between calls.

pub mod address;
pub mod private_key;

pub use address::{AddressError, SuiAddress};
pub use private_key::{decode_private_key, encode_private_key, DecodedKeyMaterial, KeyDecodeError};
