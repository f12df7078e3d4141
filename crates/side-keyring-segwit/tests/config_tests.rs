//! Keyring configuration file handling

use std::path::PathBuf;

use side_keyring_core::{Bip32Path, KeyringError};
use side_keyring_segwit::{Backend, KeyringConfig, LedgerConfig};
use tempfile::TempDir;

#[test]
fn test_load_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("keyring.toml");
    std::fs::write(
        &path,
        r#"
backend = "file"

[ledger]
account = 2
"#,
    )
    .unwrap();

    let config = KeyringConfig::load(&path).unwrap();
    assert_eq!(config.backend, Backend::File);
    assert_eq!(config.service_name, "side");
    assert!(config.ledger.enabled);
    assert_eq!(config.ledger.account, 2);
    assert_eq!(config.ledger.index, 0);
}

#[test]
fn test_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("keyring.toml");

    let config = KeyringConfig {
        service_name: "side-testnet".to_string(),
        backend: Backend::Test,
        root_dir: PathBuf::from("/var/lib/side"),
        ledger: LedgerConfig {
            enabled: false,
            account: 1,
            index: 5,
        },
    };
    config.save(&path).unwrap();

    assert_eq!(KeyringConfig::load(&path).unwrap(), config);
}

#[test]
fn test_unknown_backend_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("keyring.toml");
    std::fs::write(&path, "backend = \"keychain\"\n").unwrap();

    assert!(matches!(
        KeyringConfig::load(&path),
        Err(KeyringError::Config(_))
    ));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = KeyringConfig::load(&temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(KeyringError::Io(_))));
}

#[test]
fn test_init_builds_segwit_keyring() {
    let config = KeyringConfig {
        ledger: LedgerConfig {
            enabled: true,
            account: 4,
            index: 12,
        },
        ..Default::default()
    };

    let init = config.init().unwrap();
    assert_eq!(init.service_name, "side");
    assert_eq!(init.backend, Backend::Os);
    assert_eq!(init.ledger_path, Some(Bip32Path::bitcoin_segwit(4, 12).unwrap()));
    assert_eq!(
        init.ledger_path.unwrap().to_string(),
        "m/84'/0'/4'/0/12"
    );
    init.options.validate().unwrap();
    assert_eq!(init.options.ledger_app_name, "Bitcoin");
}

#[test]
fn test_hardened_account_or_index_rejected() {
    for (account, index) in [(0x8000_0003, 7), (3, 0x8000_0007)] {
        let config = KeyringConfig {
            ledger: LedgerConfig {
                enabled: true,
                account,
                index,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(KeyringError::Config(_))));
        assert!(matches!(config.init(), Err(KeyringError::Config(_))));
    }
}

#[test]
fn test_hardened_account_in_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("keyring.toml");
    std::fs::write(&path, "[ledger]\naccount = 2147483651\n").unwrap();

    // Loads fine, but must not alias account 3
    let config = KeyringConfig::load(&path).unwrap();
    assert!(config.init().is_err());
}
