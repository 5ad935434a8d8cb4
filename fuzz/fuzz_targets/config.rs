#![no_main]

use libfuzzer_sys::fuzz_target;
use restable::config::ConfigDescription;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = ConfigDescription::parse(s) {
            let _ = config.to_string();
        }
    }
});
