//! Terminal walkthrough of the keyforge wallet lifecycle.
//!
//! A contract owner pre-registers a recipient's address from a hashed
//! email, the recipient later re-derives the keypair and signs a claim, and
//! an exported `suiprivkey1…` key is imported back to the same address.
//!
//! Run with:
//!   cargo run -p keyforge-protocol --example demo

use std::time::Instant;

use keyforge_protocol::crypto::{sha256_hex, verify};
use keyforge_protocol::identity::{encode_private_key, SuiAddress};
use keyforge_protocol::wallet::{
    derive_keypair, from_inputs, from_mnemonic, generate, import_private_key, SeedInputs,
};
use keyforge_protocol::WalletResult;

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=== {title}{RESET}");
}

fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {DIM}{label:<14}{RESET} {value}");
}

fn ok(msg: &str) {
    println!("  {GREEN}[ok]{RESET} {msg}");
}

fn main() -> WalletResult<()> {
    let hashed_email = sha256_hex(b"alice@example.com");
    let context = "allowlist-creation";

    section(1, "Contract owner pre-registers Alice");
    let started = Instant::now();
    let wallet = from_inputs(&hashed_email, "contract-abc", context)?;
    field("hashedEmail", &hashed_email);
    field("contractId", &wallet.contract_id);
    field("method", wallet.method);
    field("address", wallet.address);
    field("took", format!("{:?}", started.elapsed()));

    section(2, "Same inputs, same address. New contract, new address");
    let again = from_inputs(&hashed_email, "contract-abc", context)?;
    let other = from_inputs(&hashed_email, "contract-xyz", context)?;
    assert_eq!(again.address, wallet.address);
    assert_ne!(other.address, wallet.address);
    ok("re-derivation is stable");
    field("contract-xyz", other.address);

    section(3, "Alice logs in and proves control");
    let inputs = SeedInputs::new(&hashed_email, "contract-abc", context)?;
    let keypair = derive_keypair(&inputs)?;
    let claim = b"claim allowlist slot on contract-abc";
    let signature = keypair.sign(claim);
    assert_eq!(SuiAddress::from_public_key(&keypair.public_key()), wallet.address);
    assert!(verify(&keypair.public_key(), claim, &signature));
    field("publicKey", keypair.public_key());
    field("signature", &signature.to_hex()[..32]);
    ok("signature verifies against the registered address");

    section(4, "Export and re-import");
    let exported = encode_private_key(&keypair)?;
    let imported = import_private_key(&exported)?;
    assert_eq!(imported.address, wallet.address);
    field("scheme", imported.scheme);
    ok("suiprivkey1… round-trips to the same address");

    section(5, "A fresh wallet behind a recovery phrase");
    let fresh = generate()?;
    field("method", fresh.method);
    field("address", fresh.address);
    field("words", fresh.mnemonic.word_count());
    let recovered = from_mnemonic(fresh.mnemonic.phrase())?;
    assert_eq!(recovered.address, fresh.address);
    ok("the phrase alone recovers the same address");

    println!();
    Ok(())
}
