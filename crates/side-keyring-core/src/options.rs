//! Keyring options record and configurators

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::algo::SigningAlgoList;
use crate::error::{KeyringError, Result};
use crate::ledger::{normalize_ledger_signature, LedgerDerivation, LedgerSecp256k1};
use crate::pubkey::PubKey;

/// Hook that wraps raw Ledger key bytes into a public key
pub type CreatePubKey = Arc<dyn Fn(&[u8]) -> Box<dyn PubKey> + Send + Sync>;

/// A configurator that overwrites some fields of an [`Options`] record
pub type KeyringOption = Box<dyn Fn(&mut Options) + Send + Sync>;

/// Signing parameters handed to a keyring at construction
///
/// `Options::default()` is the zeroed record: no algorithms, no hooks, an
/// empty app name, and DER conversion enabled.
#[derive(Clone, Default)]
pub struct Options {
    /// Algorithms accepted for locally stored keys
    pub supported_algos: SigningAlgoList,
    /// Algorithms accepted for Ledger-backed keys
    pub supported_algos_ledger: SigningAlgoList,
    /// Opens a session with the Ledger device
    pub ledger_derivation: Option<LedgerDerivation>,
    /// Builds a public key from the bytes returned by the device
    pub ledger_create_key: Option<CreatePubKey>,
    /// Ledger app that must be open on the device
    pub ledger_app_name: String,
    /// Trust the device signature encoding instead of converting DER
    pub ledger_sig_skip_der_conv: bool,
}

impl Options {
    /// Zeroed record with each option applied in order
    pub fn new(opts: impl IntoIterator<Item = KeyringOption>) -> Self {
        let mut options = Self::default();
        for opt in opts {
            options.apply(&opt);
        }
        options
    }

    /// Apply a single configurator in place
    pub fn apply(&mut self, opt: &KeyringOption) {
        opt(self);
    }

    /// Check that every field is populated and consistent
    pub fn validate(&self) -> Result<()> {
        if self.supported_algos.is_empty() {
            return Err(KeyringError::InvalidOptions(
                "no supported signing algorithms".to_string(),
            ));
        }
        if self.supported_algos_ledger.is_empty() {
            return Err(KeyringError::InvalidOptions(
                "no supported Ledger signing algorithms".to_string(),
            ));
        }
        if let Some(algo) = self
            .supported_algos_ledger
            .iter()
            .find(|&algo| !self.supported_algos.contains(&**algo))
        {
            return Err(KeyringError::InvalidOptions(format!(
                "Ledger algorithm {} is not a supported algorithm",
                algo.name()
            )));
        }
        if self.ledger_derivation.is_none() {
            return Err(KeyringError::InvalidOptions(
                "missing Ledger derivation hook".to_string(),
            ));
        }
        if self.ledger_create_key.is_none() {
            return Err(KeyringError::InvalidOptions(
                "missing Ledger public key constructor".to_string(),
            ));
        }
        if self.ledger_app_name.is_empty() {
            return Err(KeyringError::InvalidOptions(
                "empty Ledger app name".to_string(),
            ));
        }
        Ok(())
    }

    /// Open a Ledger session through the derivation hook
    pub fn ledger_device(&self) -> Result<Box<dyn LedgerSecp256k1>> {
        let derive = self.ledger_derivation.as_ref().ok_or_else(|| {
            KeyringError::InvalidOptions("missing Ledger derivation hook".to_string())
        })?;
        debug!(app = %self.ledger_app_name, "Opening Ledger session");
        derive()
    }

    /// Wrap device key bytes with the configured constructor
    pub fn create_ledger_pubkey(&self, key: &[u8]) -> Result<Box<dyn PubKey>> {
        let create = self.ledger_create_key.as_ref().ok_or_else(|| {
            KeyringError::InvalidOptions("missing Ledger public key constructor".to_string())
        })?;
        Ok(create(key))
    }

    /// Normalize a device signature according to this record's DER setting
    pub fn normalize_ledger_signature(&self, signature: &[u8]) -> Result<Vec<u8>> {
        normalize_ledger_signature(signature, self.ledger_sig_skip_der_conv)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn hook<T>(h: &Option<T>) -> &'static str {
            if h.is_some() {
                "Some(<fn>)"
            } else {
                "None"
            }
        }

        f.debug_struct("Options")
            .field("supported_algos", &self.supported_algos)
            .field("supported_algos_ledger", &self.supported_algos_ledger)
            .field("ledger_derivation", &format_args!("{}", hook(&self.ledger_derivation)))
            .field("ledger_create_key", &format_args!("{}", hook(&self.ledger_create_key)))
            .field("ledger_app_name", &self.ledger_app_name)
            .field("ledger_sig_skip_der_conv", &self.ledger_sig_skip_der_conv)
            .finish()
    }
}
