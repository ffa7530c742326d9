/// Sample layout of a Netpbm family, independent of ASCII/binary encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleLayout {
    /// PBM (P1/P4): one sample per pixel, 0 = white, 1 = black.
    Bitmap,
    /// PGM (P2/P5): one 8-bit gray sample per pixel.
    Gray,
    /// PPM (P3/P6): three 8-bit samples per pixel, interleaved R, G, B.
    Rgb,
}

impl SampleLayout {
    /// Number of samples stored per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::Bitmap | Self::Gray => 1,
            Self::Rgb => 3,
        }
    }

    /// Whether the header carries a maxval field.
    pub fn has_maxval(&self) -> bool {
        !matches!(self, Self::Bitmap)
    }
}
