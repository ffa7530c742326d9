//! Reference RLE reader and image builders shared by the integration tests.
//!
//! The reader is written from the output format alone: a textual header of
//! newline-terminated lines, then 3-byte packets (value, little-endian u16
//! count) until end of file.

#![allow(dead_code)]

use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub struct RleFile {
    pub magic: String,
    pub width: u32,
    pub height: u32,
    pub maxval: Option<u32>,
    pub packets: Vec<(u8, u16)>,
}

impl RleFile {
    /// Expand the packets back into the sample stream.
    pub fn samples(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for &(value, count) in &self.packets {
            out.extend(std::iter::repeat_n(value, usize::from(count)));
        }
        out
    }
}

fn take_line<'a>(data: &mut &'a [u8]) -> &'a str {
    let end = data
        .iter()
        .position(|&b| b == b'\n')
        .expect("header line is not newline-terminated");
    let line = std::str::from_utf8(&data[..end]).expect("header line is not UTF-8");
    *data = &data[end + 1..];
    line
}

pub fn parse_rle(mut data: &[u8]) -> RleFile {
    let magic = take_line(&mut data).to_string();
    let dims = take_line(&mut data);
    let (w, h) = dims.split_once(' ').expect("dimension line has two fields");
    let width = w.parse().expect("width");
    let height = h.parse().expect("height");
    let maxval = match magic.as_str() {
        "P1" | "P4" => None,
        _ => Some(take_line(&mut data).parse().expect("maxval")),
    };
    assert_eq!(data.len() % 3, 0, "packet stream is not a multiple of 3 bytes");
    let packets = data
        .chunks_exact(3)
        .map(|p| (p[0], u16::from_le_bytes([p[1], p[2]])))
        .collect();
    RleFile {
        magic,
        width,
        height,
        maxval,
        packets,
    }
}

/// Binary Netpbm file (P4/P5/P6) from a header line set and raw raster.
pub fn binary_pnm(magic: &str, width: u32, height: u32, maxval: Option<u32>, raster: &[u8]) -> Vec<u8> {
    let mut out = format!("{magic}\n{width} {height}\n").into_bytes();
    if let Some(m) = maxval {
        out.extend_from_slice(format!("{m}\n").as_bytes());
    }
    out.extend_from_slice(raster);
    out
}

/// ASCII Netpbm file (P1/P2/P3), one row of samples per line.
pub fn ascii_pnm(
    magic: &str,
    width: u32,
    height: u32,
    maxval: Option<u32>,
    samples: &[u8],
) -> Vec<u8> {
    let mut out = format!("{magic}\n{width} {height}\n");
    if let Some(m) = maxval {
        out.push_str(&format!("{m}\n"));
    }
    let per_row = (samples.len() / height.max(1) as usize).max(1);
    for row in samples.chunks(per_row) {
        let line: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 200 + (c as u8 * 20);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 10 + (c as u8 * 30);
                }
            }
        }
    }
    pixels
}

pub fn noise_pattern(len: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

/// Horizontal bands of constant value, `band` rows tall.
pub fn bands(w: usize, h: usize, band: usize) -> Vec<u8> {
    (0..h)
        .flat_map(|y| std::iter::repeat_n((y / band * 40) as u8, w))
        .collect()
}

/// Fresh per-test scratch directory.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pnmrle-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
