//! Keyring configuration

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use side_keyring_core::{Bip32Path, KeyringError, Options, Result};
use tracing::debug;

use crate::options::option;

/// Environment variable overriding the configured backend
pub const BACKEND_ENV: &str = "SIDE_KEYRING_BACKEND";

/// Where the keyring keeps its key material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Operating system credential store
    #[default]
    Os,
    /// Password-encrypted files under the root directory
    File,
    Kwallet,
    Pass,
    /// Unencrypted files, for tests only
    Test,
    /// In-process, lost on exit
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Os => "os",
            Backend::File => "file",
            Backend::Kwallet => "kwallet",
            Backend::Pass => "pass",
            Backend::Test => "test",
            Backend::Memory => "memory",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = KeyringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "os" => Ok(Backend::Os),
            "file" => Ok(Backend::File),
            "kwallet" => Ok(Backend::Kwallet),
            "pass" => Ok(Backend::Pass),
            "test" => Ok(Backend::Test),
            "memory" => Ok(Backend::Memory),
            other => Err(KeyringError::Config(format!(
                "unknown keyring backend: {}",
                other
            ))),
        }
    }
}

/// Ledger account selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub enabled: bool,
    /// BIP84 account, below 2^31; hardened when the path is built
    pub account: u32,
    /// Address index on the external chain, below 2^31
    pub index: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            account: 0,
            index: 0,
        }
    }
}

/// Keyring configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyringConfig {
    /// Service name the keys are stored under
    pub service_name: String,

    pub backend: Backend,

    /// Home directory for file-based backends
    pub root_dir: PathBuf,

    pub ledger: LedgerConfig,
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            service_name: "side".to_string(),
            backend: Backend::default(),
            root_dir: Self::default_root_dir(),
            ledger: LedgerConfig::default(),
        }
    }
}

/// Everything a keyring constructor needs
#[derive(Debug, Clone)]
pub struct KeyringInit {
    pub service_name: String,
    pub backend: Backend,
    pub root_dir: PathBuf,
    pub options: Options,
    /// Path of the Ledger account, when the Ledger is enabled
    pub ledger_path: Option<Bip32Path>,
}

impl KeyringConfig {
    fn default_root_dir() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".side")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| KeyringError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), backend = %config.backend, "Loaded keyring config");
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| KeyringError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `SIDE_KEYRING_BACKEND` if set
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        let value = std::env::var(BACKEND_ENV).ok();
        self.apply_backend_override(value.as_deref())
    }

    fn apply_backend_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(value) = value {
            self.backend = value.parse()?;
            debug!(backend = %self.backend, "Keyring backend overridden from {}", BACKEND_ENV);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(KeyringError::Config("service_name must not be empty".to_string()));
        }
        for (name, value) in [
            ("ledger.account", self.ledger.account),
            ("ledger.index", self.ledger.index),
        ] {
            if value >= Bip32Path::HARDENED {
                return Err(KeyringError::Config(format!(
                    "{} must be below {}, got {}",
                    name,
                    Bip32Path::HARDENED,
                    value
                )));
            }
        }
        Ok(())
    }

    /// Build the keyring constructor arguments with segwit options
    pub fn init(&self) -> Result<KeyringInit> {
        self.validate()?;

        let ledger_path = self
            .ledger
            .enabled
            .then(|| Bip32Path::bitcoin_segwit(self.ledger.account, self.ledger.index))
            .transpose()?;

        Ok(KeyringInit {
            service_name: self.service_name.clone(),
            backend: self.backend,
            root_dir: self.root_dir.clone(),
            options: Options::new([option()]),
            ledger_path,
        })
    }
}
