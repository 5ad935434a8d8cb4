#![no_main]

use libfuzzer_sys::fuzz_target;
use restable::resource::ResourceName;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(name) = ResourceName::parse(s) {
            let _ = ResourceName::parse(&name.to_string());
        }
    }
});
