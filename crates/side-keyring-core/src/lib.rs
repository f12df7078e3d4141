//! Side Keyring Core - Options contract for pluggable keyring signing
//!
//! A keyring is parameterized by an [`Options`] record: which signing
//! algorithms it accepts, how Ledger public keys are built, and how the
//! Ledger device is reached. Chain-specific crates fill the record through a
//! [`KeyringOption`] configurator.

pub mod algo;
pub mod error;
pub mod ledger;
pub mod options;
pub mod pubkey;

pub use algo::{PubKeyType, SigningAlgo, SigningAlgoList};
pub use error::{KeyringError, Result};
pub use ledger::{normalize_ledger_signature, Bip32Path, LedgerDerivation, LedgerSecp256k1};
pub use options::{CreatePubKey, KeyringOption, Options};
pub use pubkey::{Address, PubKey, ADDRESS_LENGTH};
