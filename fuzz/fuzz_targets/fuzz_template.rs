#![no_main]
use libfuzzer_sys::fuzz_target;

use htmpl::{render_str, Context};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = render_str(s, &Context::new());
    }
});
