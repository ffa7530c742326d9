#![no_main]
use libfuzzer_sys::fuzz_target;
use pnmrle::{BitmapMode, CompressRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic, in either bitmap mode
    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };
    for mode in [BitmapMode::Unpacked, BitmapMode::PackedBytes] {
        let _ = CompressRequest::new()
            .with_limits(&limits)
            .with_bitmap_mode(mode)
            .compress(data, Vec::<u8>::new(), enough::Unstoppable);
    }
    let _ = pnmrle::probe(data);
});
