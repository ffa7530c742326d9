#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_compress";
    fs::create_dir_all(dir).unwrap();

    // One seed per magic token
    fs::write(format!("{dir}/pbm_ascii_3x2.pbm"), b"P1\n3 2\n1 0 1\n0 1 0\n").unwrap();
    fs::write(format!("{dir}/pgm_ascii_2x2.pgm"), b"P2\n2 2\n15\n0 15\n7 7\n").unwrap();
    fs::write(format!("{dir}/ppm_ascii_1x1.ppm"), b"P3\n1 1\n255\n1 2 3\n").unwrap();
    fs::write(format!("{dir}/pbm_10x2.pbm"), b"P4\n10 2\n\xff\xc0\x00\x40").unwrap();
    fs::write(format!("{dir}/pgm_4x1.pgm"), b"P5\n4 1\n255\n\x0a\x0a\x0a\x14").unwrap();
    fs::write(format!("{dir}/ppm_2x2.ppm"), b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80").unwrap();

    // Comments between header tokens
    fs::write(
        format!("{dir}/pgm_comments.pgm"),
        b"P5\n# one\n# two\n2 # w\n1\n#m\n255\n\x01\x02",
    )
    .unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p9.bin"), b"P9\n1 1\n255\n\x00").unwrap();
    fs::write(format!("{dir}/short_raster.bin"), b"P5\n4 4\n255\n\x00").unwrap();
    fs::write(format!("{dir}/huge_dims.bin"), b"P5\n4294967295 4294967295\n255\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
