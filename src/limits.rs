//! Caps on what a parsed header may ask the loader to allocate.

use crate::error::RleError;
use crate::pnm::PnmHeader;

/// Resource caps, checked once the header is parsed and before any raster
/// byte is read. `None` leaves that quantity uncapped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted width or height.
    pub max_side: Option<u32>,
    /// Largest accepted `width * height`.
    pub max_pixels: Option<u64>,
    /// Largest sample buffer in bytes. Samples are one byte each, so this
    /// caps the loaded sample count, which depends on the channel count and
    /// the bitmap mode.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject `header` if its dimensions, or the `buffer_len` samples its
    /// raster loads to, go over a cap.
    pub(crate) fn check(&self, header: &PnmHeader, buffer_len: usize) -> Result<(), RleError> {
        let side = header.width.max(header.height);
        within(self.max_side.map(u64::from), u64::from(side), "pixels on a side")?;
        within(self.max_pixels, header.pixel_count() as u64, "pixels")?;
        within(self.max_memory_bytes, buffer_len as u64, "sample bytes")
    }
}

fn within(cap: Option<u64>, value: u64, what: &str) -> Result<(), RleError> {
    match cap {
        Some(cap) if value > cap => Err(RleError::LimitExceeded(format!(
            "{value} {what}, cap is {cap}"
        ))),
        _ => Ok(()),
    }
}
