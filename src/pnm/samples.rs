//! Sample loading for all six Netpbm variants.
//!
//! Every variant ends up as one byte per sample. Short rasters are reported
//! as [`RleError::TruncatedInput`]; the buffer is never handed on partially
//! filled.

use std::io::BufRead;

use enough::Stop;

use super::PnmFormat;
use super::bits::{packed_row_len, unpack_row};
use super::header::PnmHeader;
use super::reader::ByteReader;
use crate::error::RleError;
use crate::limits::Limits;

/// Bytes read between cancellation checks on binary rasters.
const BLOCK_LEN: usize = 64 * 1024;
/// Samples parsed between cancellation checks on ASCII rasters.
const TOKENS_PER_CHECK: usize = 4096;
/// Most the buffer reserves before any raster byte is read. Larger rasters
/// grow the buffer as their data arrives.
const RESERVE_AHEAD: usize = 16 * 1024 * 1024;

/// How P4 (binary bitmap) rasters become samples.
///
/// P1 rasters always yield one sample per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum BitmapMode {
    /// Unpack bits MSB first, one sample per pixel (1 = black, 0 = white).
    /// Row padding bits are dropped. A P1 and a P4 of the same image load
    /// to identical buffers.
    #[default]
    Unpacked,
    /// Encode the packed raster as bytes, one sample per byte. The raster
    /// is read as `ceil(width * height / 8)` bytes with no per-row padding,
    /// so a 2x2 image is a single byte.
    PackedBytes,
}

/// Flat buffer of 8-bit samples, color samples interleaved per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<u8>,
}

impl SampleBuffer {
    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.samples
    }
}

impl AsRef<[u8]> for SampleBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.samples
    }
}

/// Number of samples the raster of `header` loads to under `mode`.
pub(crate) fn buffer_len(header: &PnmHeader, mode: BitmapMode) -> usize {
    match (header.format, mode) {
        (PnmFormat::PbmBinary, BitmapMode::PackedBytes) => header.pixel_count().div_ceil(8),
        _ => header.sample_count(),
    }
}

/// Load the raster that follows `header`.
pub(crate) fn load_samples<R: BufRead>(
    reader: &mut ByteReader<R>,
    header: &PnmHeader,
    mode: BitmapMode,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<SampleBuffer, RleError> {
    let len = buffer_len(header, mode);
    if let Some(limits) = limits {
        limits.check(header, len)?;
    }
    stop.check()?;

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(len.min(RESERVE_AHEAD))
        .map_err(|_| RleError::AllocationFailed(len))?;

    match header.format {
        PnmFormat::PbmBinary if mode == BitmapMode::Unpacked => {
            load_packed_bits(reader, header, len, &mut samples, stop)?;
        }
        PnmFormat::PbmBinary | PnmFormat::PgmBinary | PnmFormat::PpmBinary => {
            load_raw(reader, len, &mut samples, stop)?;
        }
        PnmFormat::PbmAscii => load_ascii_bits(reader, len, &mut samples, stop)?,
        PnmFormat::PgmAscii | PnmFormat::PpmAscii => {
            load_ascii_tokens(reader, header.max_sample(), len, &mut samples, stop)?;
        }
    }

    log::debug!(
        "loaded {} samples from {} raster",
        samples.len(),
        header.format.magic()
    );
    Ok(SampleBuffer { samples })
}

/// Make room for `additional` more samples of a `len`-sample buffer.
fn grow(samples: &mut Vec<u8>, additional: usize, len: usize) -> Result<(), RleError> {
    samples
        .try_reserve(additional)
        .map_err(|_| RleError::AllocationFailed(len))
}

fn load_raw<R: BufRead>(
    reader: &mut ByteReader<R>,
    len: usize,
    samples: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), RleError> {
    let mut block = vec![0u8; len.min(BLOCK_LEN)];
    while samples.len() < len {
        stop.check()?;
        let want = (len - samples.len()).min(block.len());
        let n = reader.read_block(&mut block[..want])?;
        grow(samples, n, len)?;
        samples.extend_from_slice(&block[..n]);
        if n < want {
            return Err(RleError::TruncatedInput {
                read: samples.len(),
                expected: len,
                unit: "bytes",
            });
        }
    }
    Ok(())
}

fn load_packed_bits<R: BufRead>(
    reader: &mut ByteReader<R>,
    header: &PnmHeader,
    len: usize,
    samples: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), RleError> {
    let width = header.width as usize;
    if len == 0 {
        return Ok(());
    }
    let row_bytes = packed_row_len(width);
    let expected = row_bytes * header.height as usize;
    let mut packed = vec![0u8; row_bytes];

    for row_idx in 0..header.height as usize {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let n = reader.read_block(&mut packed)?;
        if n < row_bytes {
            return Err(RleError::TruncatedInput {
                read: row_idx * row_bytes + n,
                expected,
                unit: "bytes",
            });
        }
        grow(samples, width, len)?;
        let start = samples.len();
        samples.resize(start + width, 0);
        unpack_row(&packed, &mut samples[start..]);
    }
    debug_assert_eq!(samples.len(), len);
    Ok(())
}

fn load_ascii_bits<R: BufRead>(
    reader: &mut ByteReader<R>,
    len: usize,
    samples: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), RleError> {
    for i in 0..len {
        if i % TOKENS_PER_CHECK == 0 {
            stop.check()?;
            grow(samples, (len - i).min(TOKENS_PER_CHECK), len)?;
        }
        reader.skip_separators()?;
        // Plain PBM digits need no separator between them.
        let bit = match reader.next_byte()? {
            Some(b'0') => 0,
            Some(b'1') => 1,
            Some(b) => {
                return Err(RleError::InvalidSample(format!(
                    "expected 0 or 1 at pixel {i}, found {:?}",
                    char::from(b)
                )));
            }
            None => {
                return Err(RleError::TruncatedInput {
                    read: i,
                    expected: len,
                    unit: "samples",
                });
            }
        };
        samples.push(bit);
    }
    Ok(())
}

fn load_ascii_tokens<R: BufRead>(
    reader: &mut ByteReader<R>,
    maxval: u32,
    len: usize,
    samples: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), RleError> {
    for i in 0..len {
        if i % TOKENS_PER_CHECK == 0 {
            stop.check()?;
            grow(samples, (len - i).min(TOKENS_PER_CHECK), len)?;
        }
        reader.skip_separators()?;
        let value = match reader.read_decimal()? {
            Some(v) => v,
            None => {
                return Err(match reader.next_byte()? {
                    Some(b) => RleError::InvalidSample(format!(
                        "expected a number at sample {i}, found {:?}",
                        char::from(b)
                    )),
                    None => RleError::TruncatedInput {
                        read: i,
                        expected: len,
                        unit: "samples",
                    },
                });
            }
        };
        if value > u64::from(maxval) {
            return Err(RleError::InvalidSample(format!(
                "sample {value} at index {i} exceeds maxval {maxval}"
            )));
        }
        // maxval <= 255, so the value fits.
        samples.push(value as u8);
    }
    Ok(())
}
