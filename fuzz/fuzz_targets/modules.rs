#![no_main]

use libfuzzer_sys::fuzz_target;
use procmodules::parse_modules;

fuzz_target!(|data: &[u8]| {
    if let Ok(modules) = parse_modules(data, "fuzz") {
        for record in modules.values() {
            let line = record.to_string();
            assert_eq!(procmodules::ModuleRecord::parse_line(&line).as_ref().ok(), Some(record));
        }
    }
});
