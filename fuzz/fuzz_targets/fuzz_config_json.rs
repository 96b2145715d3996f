#![no_main]

use libfuzzer_sys::fuzz_target;
use vrt_diff_core::{resolve, ConfigFile, ConfigOverrides};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(file) = ConfigFile::from_json(json) else {
        return;
    };

    // Resolution must either reject the file or yield an in-range tolerance
    if let Ok(resolved) = resolve(&ConfigOverrides::default(), &file) {
        assert!((0.0..=100.0).contains(&resolved.config.tolerance));
    }
});
