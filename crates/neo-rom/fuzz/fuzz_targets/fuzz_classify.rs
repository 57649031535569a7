//! Fuzz target for ROM file name classification.

#![no_main]

use libfuzzer_sys::fuzz_target;
use neo_rom::role::{classify, matches};
use neo_rom::RomRole;

fuzz_target!(|data: &[u8]| {
    let name = String::from_utf8_lossy(data);

    if let Some(role) = classify(&name) {
        assert!(matches(&name, role, role.number_included()));
    }
    for role in RomRole::ALL {
        let _ = matches(&name, role, true);
        let _ = matches(&name, role, false);
    }
});
