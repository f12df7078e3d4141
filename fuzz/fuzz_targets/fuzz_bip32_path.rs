#![no_main]

use libfuzzer_sys::fuzz_target;
use side_keyring_core::ledger::{Bip32Path, MAX_PATH_DEPTH};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing should not panic
        if let Ok(path) = s.parse::<Bip32Path>() {
            assert!(path.depth() <= MAX_PATH_DEPTH);
            assert_eq!(path.to_bytes().len(), path.depth() * 4);

            // Canonical form parses back to the same path
            let reparsed: Bip32Path = path.to_string().parse().unwrap();
            assert_eq!(reparsed, path);
        }
    }
});
