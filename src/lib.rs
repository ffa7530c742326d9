//! # pnmrle
//!
//! Run-length encoder for Netpbm images.
//!
//! Reads any of the six classic Netpbm variants, loads the raster as one
//! 8-bit sample per channel, and writes the original header followed by a
//! stream of 3-byte `(value, count)` packets.
//!
//! ## Supported Formats
//!
//! - **P1** / **P4** — bitmap (PBM), ASCII / binary
//! - **P2** / **P5** — grayscale (PGM), ASCII / binary, maxval up to 255
//! - **P3** / **P6** — RGB (PPM), ASCII / binary, maxval up to 255
//!
//! ## Output Format
//!
//! ```text
//! P5\n            magic token, as read
//! 4 1\n           width height
//! 255\n           maxval (PGM/PPM only)
//! [v][lo][hi]...  packets: sample value, run length as little-endian u16
//! ```
//!
//! Runs longer than 65535 samples are split into several packets with the
//! same value. There is no packet count or end marker. Color samples are
//! encoded in their interleaved order, so runs cross channel and pixel
//! boundaries.
//!
//! ## Non-Goals
//!
//! - Decoding the RLE stream back to Netpbm
//! - 16-bit samples (maxval above 255)
//! - PAM (P7) and PFM
//!
//! ## Usage
//!
//! ```
//! use pnmrle::Unstoppable;
//!
//! let input: &[u8] = b"P5\n4 1\n255\n\x0a\x0a\x0a\x14";
//! let mut output: Vec<u8> = Vec::new();
//! let summary = pnmrle::compress(input, &mut output, Unstoppable)?;
//! assert_eq!(summary.packets, 2);
//! assert_eq!(&output[..11], b"P5\n4 1\n255\n");
//! # Ok::<(), pnmrle::RleError>(())
//! ```

#![forbid(unsafe_code)]

mod compress;
mod error;
mod limits;
mod pixel;

pub mod pnm;
pub mod rle;

use std::io::{BufRead, Write};
use std::path::Path;

// Re-exports
pub use compress::{CompressRequest, CompressSummary, write_rle};
pub use enough::{Stop, Unstoppable};
pub use error::RleError;
pub use limits::Limits;
pub use pixel::SampleLayout;
pub use pnm::{BitmapMode, PnmFormat, PnmHeader, SampleBuffer};
pub use rle::{MAX_RUN, RlePacket, Runs, runs};

/// Convert a Netpbm stream to RLE with default settings.
pub fn compress<R: BufRead, W: Write>(
    input: R,
    output: W,
    stop: impl Stop,
) -> Result<CompressSummary, RleError> {
    CompressRequest::new().compress(input, output, stop)
}

/// Convert a Netpbm file to an RLE file with default settings.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    stop: impl Stop,
) -> Result<CompressSummary, RleError> {
    CompressRequest::new().compress_file(input, output, stop)
}

/// Parse the header at the start of `data` without loading samples.
pub fn probe(data: &[u8]) -> Result<PnmHeader, RleError> {
    pnm::parse_header(&mut pnm::reader::ByteReader::new(data))
}

/// Read a Netpbm stream into its header and sample buffer with default
/// settings.
pub fn read_image<R: BufRead>(
    input: R,
    stop: impl Stop,
) -> Result<(PnmHeader, SampleBuffer), RleError> {
    CompressRequest::new().read_image(input, stop)
}
