#![no_main]

use libfuzzer_sys::fuzz_target;
use restable::{diagnostics::Diagnostics, resource::Source, xml};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = xml::inflate(s, &Diagnostics::new(), Source::new("fuzz.xml"));
    }
});
