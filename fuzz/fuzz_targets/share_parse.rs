#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_vss::ShamirShare;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes must never panic — always Ok or Err.
    if let Ok(share) = ShamirShare::from_bytes(data) {
        // A successful parse must round-trip exactly.
        let bytes = share.to_bytes();
        let reparsed = ShamirShare::from_bytes(&bytes).expect("serialized share parses");
        assert_eq!(reparsed, share);
    }
});
