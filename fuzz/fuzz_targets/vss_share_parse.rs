#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_vss::VssShare;

// Tag/key lengths of the default Poly1305 engine configuration.
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

fuzz_target!(|data: &[u8]| {
    if let Ok(share) = VssShare::from_bytes(data, TAG_LEN, KEY_LEN) {
        let bytes = share.to_bytes();
        let reparsed =
            VssShare::from_bytes(&bytes, TAG_LEN, KEY_LEN).expect("serialized share parses");
        assert_eq!(reparsed, share);
    }
});
