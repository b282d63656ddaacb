#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let scanner = tokscan::Scanner::new();
    let _ = scanner.scan_bytes(data);
});
