#![no_main]

use libfuzzer_sys::fuzz_target;
use zusi_fahrstrassen::{parse_module, DataPath};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_module(DataPath::new("fuzz.st3"), text);
    }
});
