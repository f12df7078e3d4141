//! Error types for the keyring contract

use thiserror::Error;

/// Result type for keyring operations
pub type Result<T> = std::result::Result<T, KeyringError>;

/// Errors raised while validating or using keyring options
#[derive(Debug, Error)]
pub enum KeyringError {
    /// Options record is missing a field or is inconsistent
    #[error("Invalid keyring options: {0}")]
    InvalidOptions(String),

    /// No supported algorithm carries the requested name
    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// No Ledger transport is wired into the derivation hook
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// Device returned an error or a malformed response
    #[error("Ledger device error: {0}")]
    Device(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
