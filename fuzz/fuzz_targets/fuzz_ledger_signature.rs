#![no_main]

use libfuzzer_sys::fuzz_target;
use side_keyring_core::normalize_ledger_signature;

fuzz_target!(|data: &[u8]| {
    assert_eq!(normalize_ledger_signature(data, true).unwrap(), data);

    if let Ok(compact) = normalize_ledger_signature(data, false) {
        assert_eq!(compact.len(), 64);
    }
});
