//! Ledger device contract
//!
//! The keyring never talks to a Ledger directly. It calls the
//! [`LedgerDerivation`] hook from its options to obtain a device handle and
//! drives it through [`LedgerSecp256k1`]. Transports (HID, TCP emulator)
//! live with whoever supplies the hook.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{KeyringError, Result};

/// Maximum number of components accepted in a derivation path
pub const MAX_PATH_DEPTH: usize = 10;

/// A secp256k1-capable Ledger app session
pub trait LedgerSecp256k1: Send {
    /// Public key at `path`, as returned by the device app
    fn get_public_key_secp256k1(&mut self, path: &[u32]) -> Result<Vec<u8>>;

    /// Public key and display address (using `hrp`) at `path`
    fn get_address_pubkey_secp256k1(
        &mut self,
        path: &[u32],
        hrp: &str,
    ) -> Result<(Vec<u8>, String)>;

    /// Sign `message` at `path`; `p2` selects the app's signing mode
    fn sign_secp256k1(&mut self, path: &[u32], message: &[u8], p2: u8) -> Result<Vec<u8>>;

    fn close(&mut self) -> Result<()>;
}

/// Hook that opens a Ledger session
pub type LedgerDerivation = Arc<dyn Fn() -> Result<Box<dyn LedgerSecp256k1>> + Send + Sync>;

/// BIP32 derivation path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bip32Path(Vec<u32>);

impl Bip32Path {
    /// High bit marking a hardened component
    pub const HARDENED: u32 = 0x8000_0000;

    pub fn new(components: Vec<u32>) -> Result<Self> {
        if components.len() > MAX_PATH_DEPTH {
            return Err(KeyringError::InvalidDerivationPath(format!(
                "Path too long ({} components, max {})",
                components.len(),
                MAX_PATH_DEPTH
            )));
        }
        Ok(Self(components))
    }

    /// Native segwit path: m/84'/0'/account'/0/index
    ///
    /// `account` and `index` must be below [`Self::HARDENED`]; the account is
    /// hardened here.
    pub fn bitcoin_segwit(account: u32, index: u32) -> Result<Self> {
        for (name, value) in [("account", account), ("index", index)] {
            if value >= Self::HARDENED {
                return Err(KeyringError::InvalidDerivationPath(format!(
                    "{} out of range: {}",
                    name, value
                )));
            }
        }

        Ok(Self(vec![
            84 | Self::HARDENED, // purpose (BIP84)
            Self::HARDENED,      // coin type (BTC)
            account | Self::HARDENED,
            0, // external chain
            index,
        ]))
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// APDU encoding: each component as 4 big-endian bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|c| c.to_be_bytes()).collect()
    }
}

impl FromStr for Bip32Path {
    type Err = KeyringError;

    /// Parse "m/84'/0'/0'/0/0"; `'` or `h` marks a hardened component
    fn from_str(path: &str) -> Result<Self> {
        let mut parts = path.split('/');

        if parts.next() != Some("m") {
            return Err(KeyringError::InvalidDerivationPath(
                "Path must start with 'm'".to_string(),
            ));
        }

        let mut components = Vec::new();
        for part in parts {
            let hardened_num = part
                .strip_suffix('\'')
                .or_else(|| part.strip_suffix('h'));
            let (num_str, hardened) = match hardened_num {
                Some(stripped) => (stripped, true),
                None => (part, false),
            };

            // u32::from_str also takes a leading '+'
            if !num_str.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(KeyringError::InvalidDerivationPath(format!(
                    "Invalid path component: {}",
                    part
                )));
            }

            let num: u32 = num_str.parse().map_err(|_| {
                KeyringError::InvalidDerivationPath(format!("Invalid path component: {}", part))
            })?;

            if num >= Self::HARDENED {
                return Err(KeyringError::InvalidDerivationPath(format!(
                    "Path component out of range: {}",
                    part
                )));
            }

            components.push(if hardened { num | Self::HARDENED } else { num });
        }

        Self::new(components)
    }
}

impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for c in &self.0 {
            if c & Self::HARDENED != 0 {
                write!(f, "/{}'", c & !Self::HARDENED)?;
            } else {
                write!(f, "/{}", c)?;
            }
        }
        Ok(())
    }
}

/// Bring a Ledger signature into the 64-byte `r || s` form
///
/// When `skip_der_conversion` is set the device output is trusted to already
/// be in the expected encoding and is returned untouched. Otherwise it is
/// parsed as DER and re-encoded compact with a low S.
pub fn normalize_ledger_signature(signature: &[u8], skip_der_conversion: bool) -> Result<Vec<u8>> {
    if skip_der_conversion {
        return Ok(signature.to_vec());
    }

    let parsed = k256::ecdsa::Signature::from_der(signature)
        .map_err(|e| KeyringError::InvalidSignature(format!("Malformed DER signature: {}", e)))?;
    let parsed = parsed.normalize_s().unwrap_or(parsed);

    Ok(parsed.to_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bip32_path() {
        let path: Bip32Path = "m/84'/0'/0'/0/7".parse().unwrap();
        assert_eq!(
            path.components(),
            &[0x8000_0054, 0x8000_0000, 0x8000_0000, 0, 7]
        );
        assert_eq!(path.to_string(), "m/84'/0'/0'/0/7");
    }

    #[test]
    fn test_parse_h_suffix() {
        let path: Bip32Path = "m/44h/0h".parse().unwrap();
        assert_eq!(path.to_string(), "m/44'/0'");
    }

    #[test]
    fn test_parse_rejects_bad_paths() {
        for bad in [
            "",
            "84'/0'",
            "n/0",
            "m/x",
            "m/0/",
            "m/2147483648",
            "m/-1",
            "m/+5",
            "m/+5'",
            "m/ 5",
        ] {
            assert!(
                matches!(bad.parse::<Bip32Path>(), Err(KeyringError::InvalidDerivationPath(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_path_depth_limit() {
        let deep = format!("m{}", "/0".repeat(MAX_PATH_DEPTH + 1));
        assert!(deep.parse::<Bip32Path>().is_err());

        let ok = format!("m{}", "/0".repeat(MAX_PATH_DEPTH));
        assert_eq!(ok.parse::<Bip32Path>().unwrap().depth(), MAX_PATH_DEPTH);
    }

    #[test]
    fn test_bare_master_path() {
        let path: Bip32Path = "m".parse().unwrap();
        assert_eq!(path.depth(), 0);
        assert!(path.to_bytes().is_empty());
    }

    #[test]
    fn test_encode_path_bytes() {
        let encoded = Bip32Path::bitcoin_segwit(0, 0).unwrap().to_bytes();

        // 5 components * 4 bytes
        assert_eq!(encoded.len(), 20);
        assert_eq!(&encoded[0..4], &[0x80, 0x00, 0x00, 0x54]);
        assert_eq!(&encoded[4..8], &[0x80, 0x00, 0x00, 0x00]);
        assert_eq!(&encoded[16..20], &[0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_segwit_path() {
        let path = Bip32Path::bitcoin_segwit(3, 9).unwrap();
        assert_eq!(path.to_string(), "m/84'/0'/3'/0/9");
    }

    #[test]
    fn test_segwit_path_rejects_hardened_inputs() {
        for (account, index) in [(3 | Bip32Path::HARDENED, 9), (3, 9 | Bip32Path::HARDENED)] {
            assert!(matches!(
                Bip32Path::bitcoin_segwit(account, index),
                Err(KeyringError::InvalidDerivationPath(_))
            ));
        }
    }

    #[test]
    fn test_skip_der_conversion_is_identity() {
        let raw = vec![0x30, 0x01, 0xff];
        assert_eq!(normalize_ledger_signature(&raw, true).unwrap(), raw);
        assert_eq!(normalize_ledger_signature(&[], true).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_der_conversion_rejects_garbage() {
        let err = normalize_ledger_signature(&[0x30, 0x01, 0xff], false).unwrap_err();
        assert!(matches!(err, KeyringError::InvalidSignature(_)));
    }

    #[test]
    fn test_der_conversion_to_compact() {
        // r = 1, s = 2
        let der = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02];
        let compact = normalize_ledger_signature(&der, false).unwrap();

        assert_eq!(compact.len(), 64);
        assert_eq!(compact[31], 0x01);
        assert_eq!(compact[63], 0x02);
        assert!(compact[..31].iter().all(|b| *b == 0));
    }
}
