#![no_main]
use libfuzzer_sys::fuzz_target;
use pnmrle::{CompressRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // If the image loads, its packet stream must expand back to the loaded samples
    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };
    let request = CompressRequest::new().with_limits(&limits);
    let Ok((header, samples)) = request.read_image(data, enough::Unstoppable) else {
        return;
    };

    let mut out: Vec<u8> = Vec::new();
    let summary = pnmrle::write_rle(header.clone(), &samples, &mut out, enough::Unstoppable)
        .expect("writing to a Vec cannot fail");

    let header_bytes = header.to_bytes();
    assert!(out.starts_with(&header_bytes), "header not echoed");
    let packets = &out[header_bytes.len()..];
    assert_eq!(packets.len() % 3, 0);
    assert_eq!(packets.len() / 3, summary.packets);

    let mut expanded = Vec::with_capacity(samples.len());
    for p in packets.chunks_exact(3) {
        let count = u16::from_le_bytes([p[1], p[2]]);
        assert!(count >= 1, "empty packet");
        expanded.extend(std::iter::repeat_n(p[0], usize::from(count)));
    }
    assert_eq!(expanded, samples.as_slice(), "roundtrip sample mismatch");
});
