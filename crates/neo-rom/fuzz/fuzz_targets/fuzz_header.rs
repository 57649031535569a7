//! Fuzz target for `.neo` header parsing.
//!
//! Prepends the tag and version so most inputs reach the field decoding.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut input = b"NEO\x01".to_vec();
    input.extend_from_slice(data);

    // Should never panic, only return errors
    if let Ok(header) = neo_rom::parse_header(&input) {
        let _ = header.sizes.total();
        let _ = header.metadata.ngh;
    }
});
