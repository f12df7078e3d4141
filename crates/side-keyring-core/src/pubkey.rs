//! Public key contract

use std::fmt;

use crate::algo::PubKeyType;

/// Address length in bytes (hash160)
pub const ADDRESS_LENGTH: usize = 20;

/// Account address derived from a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

/// A public key as seen by the keyring
///
/// Implementations wrap raw key bytes. Whether those bytes are a valid curve
/// point is left to whoever verifies signatures with the key.
pub trait PubKey: Send + Sync + fmt::Debug + fmt::Display {
    fn address(&self) -> Address;

    /// Raw key bytes exactly as wrapped
    fn bytes(&self) -> &[u8];

    fn key_type(&self) -> PubKeyType;

    /// Same scheme and same bytes
    fn equals(&self, other: &dyn PubKey) -> bool {
        self.key_type() == other.key_type() && self.bytes() == other.bytes()
    }
}
