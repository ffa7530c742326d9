//! Netpbm family: P1/P4 (PBM), P2/P5 (PGM), P3/P6 (PPM).
//!
//! Every variant is loaded into one 8-bit sample per channel, regardless of
//! whether the raster is ASCII or binary.

mod bits;
mod header;
pub(crate) mod reader;
mod samples;

pub use header::PnmHeader;
pub use samples::{BitmapMode, SampleBuffer};

pub(crate) use header::parse_header;
pub(crate) use samples::load_samples;

use crate::pixel::SampleLayout;

/// One of the six Netpbm magic tokens.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1 — ASCII bitmap.
    PbmAscii,
    /// P2 — ASCII grayscale.
    PgmAscii,
    /// P3 — ASCII RGB.
    PpmAscii,
    /// P4 — binary bitmap, 8 pixels per byte, rows padded to a byte.
    PbmBinary,
    /// P5 — binary grayscale.
    PgmBinary,
    /// P6 — binary RGB.
    PpmBinary,
}

impl PnmFormat {
    /// Map a two-byte magic token to its format.
    pub fn from_magic(magic: [u8; 2]) -> Option<Self> {
        match &magic {
            b"P1" => Some(Self::PbmAscii),
            b"P2" => Some(Self::PgmAscii),
            b"P3" => Some(Self::PpmAscii),
            b"P4" => Some(Self::PbmBinary),
            b"P5" => Some(Self::PgmBinary),
            b"P6" => Some(Self::PpmBinary),
            _ => None,
        }
    }

    pub fn magic(self) -> &'static str {
        match self {
            Self::PbmAscii => "P1",
            Self::PgmAscii => "P2",
            Self::PpmAscii => "P3",
            Self::PbmBinary => "P4",
            Self::PgmBinary => "P5",
            Self::PpmBinary => "P6",
        }
    }

    /// Family handler this format dispatches to.
    pub fn layout(self) -> SampleLayout {
        match self {
            Self::PbmAscii | Self::PbmBinary => SampleLayout::Bitmap,
            Self::PgmAscii | Self::PgmBinary => SampleLayout::Gray,
            Self::PpmAscii | Self::PpmBinary => SampleLayout::Rgb,
        }
    }

    /// P4-P6 carry a binary raster, P1-P3 an ASCII one.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::PbmBinary | Self::PgmBinary | Self::PpmBinary)
    }
}
