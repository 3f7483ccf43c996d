#![no_main]

use libfuzzer_sys::fuzz_target;
use procmodules::Tainted;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(tainted) = Tainted::decode(text) {
            assert_eq!(Tainted::decode(&tainted.encode()).ok(), Some(tainted));
        }
    }
});
