//! Keyring options for segwit accounts
//!
//! [`option`] returns the configurator a node passes to its keyring so that
//! it accepts `segwit` keys and signs through the Ledger Bitcoin app.

use std::fmt;
use std::sync::Arc;

use side_keyring_core::{
    CreatePubKey, KeyringError, KeyringOption, LedgerDerivation, LedgerSecp256k1, Options, PubKey,
    Result, SigningAlgo, SigningAlgoList,
};
use tracing::{debug, warn};

use crate::hd::BtcSecp256k1;
use crate::pubkey::SegwitPubKey;

/// Ledger app used for signing
pub const APP_NAME: &str = "Bitcoin";

/// The Bitcoin app already returns signatures in the encoding the keyring
/// expects, so DER to BER conversion is skipped.
pub const SKIP_DER_CONVERSION: bool = true;

/// Wrap raw key bytes in a [`SegwitPubKey`] without validation
pub fn create_pubkey(key: &[u8]) -> Box<dyn PubKey> {
    Box::new(SegwitPubKey::new(key))
}

/// Derivation hook used until a Ledger transport is supplied
fn no_ledger_transport() -> Result<Box<dyn LedgerSecp256k1>> {
    warn!("Ledger requested but no transport is configured");
    Err(KeyringError::LedgerUnavailable(
        "no Ledger transport configured for the Bitcoin app".to_string(),
    ))
}

/// Immutable segwit signing configuration
///
/// `SegwitOptions::default()` carries the fixed segwit values. The only
/// variable part is the Ledger derivation hook, since the device transport is
/// provided by the embedding application.
#[derive(Clone)]
pub struct SegwitOptions {
    supported_algorithms: SigningAlgoList,
    supported_algorithms_ledger: SigningAlgoList,
    ledger_derivation: LedgerDerivation,
    create_pubkey: CreatePubKey,
}

impl Default for SegwitOptions {
    fn default() -> Self {
        let segwit: Arc<dyn SigningAlgo> = Arc::new(BtcSecp256k1);
        Self {
            supported_algorithms: SigningAlgoList::new(vec![segwit.clone()]),
            // The Ledger derivation hook handles signing and address generation
            supported_algorithms_ledger: SigningAlgoList::new(vec![segwit]),
            ledger_derivation: Arc::new(no_ledger_transport),
            create_pubkey: Arc::new(create_pubkey),
        }
    }
}

impl SegwitOptions {
    /// Use `derivation` to open Ledger sessions
    pub fn with_ledger_derivation<F>(mut self, derivation: F) -> Self
    where
        F: Fn() -> Result<Box<dyn LedgerSecp256k1>> + Send + Sync + 'static,
    {
        self.ledger_derivation = Arc::new(derivation);
        self
    }

    pub fn supported_algorithms(&self) -> &SigningAlgoList {
        &self.supported_algorithms
    }

    pub fn supported_algorithms_ledger(&self) -> &SigningAlgoList {
        &self.supported_algorithms_ledger
    }

    pub fn app_name(&self) -> &'static str {
        APP_NAME
    }

    pub fn skip_der_conversion(&self) -> bool {
        SKIP_DER_CONVERSION
    }

    /// Configurator that overwrites all six Ledger and algorithm fields
    pub fn option(&self) -> KeyringOption {
        let config = self.clone();
        Box::new(move |options: &mut Options| {
            options.supported_algos = config.supported_algorithms.clone();
            options.supported_algos_ledger = config.supported_algorithms_ledger.clone();
            options.ledger_derivation = Some(config.ledger_derivation.clone());
            options.ledger_create_key = Some(config.create_pubkey.clone());
            options.ledger_app_name = APP_NAME.to_string();
            options.ledger_sig_skip_der_conv = SKIP_DER_CONVERSION;

            debug!(
                algos = %options.supported_algos,
                app = APP_NAME,
                "Applied segwit keyring options"
            );
        })
    }
}

impl fmt::Debug for SegwitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegwitOptions")
            .field("supported_algorithms", &self.supported_algorithms)
            .field("supported_algorithms_ledger", &self.supported_algorithms_ledger)
            .field("app_name", &APP_NAME)
            .field("skip_der_conversion", &SKIP_DER_CONVERSION)
            .finish_non_exhaustive()
    }
}

/// Segwit keyring option with the default Ledger hook
pub fn option() -> KeyringOption {
    SegwitOptions::default().option()
}
