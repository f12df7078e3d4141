//! Segwit public key

use std::fmt;

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use side_keyring_core::{Address, PubKey, PubKeyType};

use crate::hd::SEGWIT;

/// secp256k1 public key addressed as a segwit witness program
///
/// The wrapped bytes are kept verbatim. No length or curve check happens here;
/// verifiers reject malformed keys when they use them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegwitPubKey {
    #[serde(with = "hex_bytes")]
    pub key: Vec<u8>,
}

impl SegwitPubKey {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.key)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self::new(hex::decode(s)?))
    }
}

impl PubKey for SegwitPubKey {
    /// hash160 of the key: RIPEMD160(SHA256(key))
    fn address(&self) -> Address {
        let sha = Sha256::digest(&self.key);
        Address::new(Ripemd160::digest(sha).into())
    }

    fn bytes(&self) -> &[u8] {
        &self.key
    }

    fn key_type(&self) -> PubKeyType {
        SEGWIT
    }
}

impl AsRef<[u8]> for SegwitPubKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl fmt::Display for SegwitPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKeySegwit{{{}}}", hex::encode_upper(&self.key))
    }
}

/// Serde helper for variable-length bytes as hex strings
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
