//! Segwit signing algorithm

use side_keyring_core::{PubKeyType, SigningAlgo};

/// Key scheme name for segwit secp256k1 keys
pub const SEGWIT: PubKeyType = PubKeyType::new("segwit");

/// secp256k1 keys addressed as native segwit (P2WPKH)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BtcSecp256k1;

impl SigningAlgo for BtcSecp256k1 {
    fn name(&self) -> PubKeyType {
        SEGWIT
    }
}
