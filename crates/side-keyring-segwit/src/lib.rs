//! Side Keyring Segwit - Bitcoin segwit signing options
//!
//! Plugs the `segwit` secp256k1 algorithm and the Ledger "Bitcoin" app into a
//! keyring:
//!
//! ```
//! use side_keyring_core::Options;
//!
//! let options = Options::new([side_keyring_segwit::option()]);
//! assert_eq!(options.ledger_app_name, "Bitcoin");
//! assert!(options.validate().is_ok());
//! ```

pub mod config;
pub mod hd;
pub mod options;
pub mod pubkey;

pub use config::{Backend, KeyringConfig, KeyringInit, LedgerConfig};
pub use hd::{BtcSecp256k1, SEGWIT};
pub use options::{create_pubkey, option, SegwitOptions, APP_NAME, SKIP_DER_CONVERSION};
pub use pubkey::SegwitPubKey;
pub use side_keyring_core::{KeyringError, Result};
