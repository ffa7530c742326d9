//! Netpbm header parsing and echo.

use std::io::{self, BufRead, Write};

use super::PnmFormat;
use super::reader::ByteReader;
use crate::error::RleError;
use crate::pixel::SampleLayout;

/// Largest maxval whose samples fit in one byte.
const MAX_8BIT_MAXVAL: u32 = 255;

/// Parsed Netpbm header.
///
/// Sizes derived from the dimensions are computed once, with overflow
/// checks, when the header is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PnmHeader {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    /// Present for grayscale and color formats only.
    pub maxval: Option<u32>,
    pixel_count: usize,
    sample_count: usize,
}

impl PnmHeader {
    /// Build a header, validating the maxval against the format.
    pub fn new(
        format: PnmFormat,
        width: u32,
        height: u32,
        maxval: Option<u32>,
    ) -> Result<Self, RleError> {
        let layout = format.layout();
        match (layout.has_maxval(), maxval) {
            (true, None) => {
                return Err(RleError::MalformedHeader(format!(
                    "{} requires a maxval",
                    format.magic()
                )));
            }
            (false, Some(_)) => {
                return Err(RleError::MalformedHeader(format!(
                    "{} has no maxval",
                    format.magic()
                )));
            }
            (true, Some(0)) => {
                return Err(RleError::MalformedHeader("maxval is zero".into()));
            }
            (true, Some(m)) if m > MAX_8BIT_MAXVAL => {
                return Err(RleError::UnsupportedFormat(format!(
                    "maxval {m} needs 16-bit samples; only 8-bit is supported"
                )));
            }
            _ => {}
        }

        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(RleError::DimensionsTooLarge { width, height })?;
        let sample_count = pixel_count
            .checked_mul(layout.channels())
            .ok_or(RleError::DimensionsTooLarge { width, height })?;

        Ok(Self {
            format,
            width,
            height,
            maxval,
            pixel_count,
            sample_count,
        })
    }

    pub fn layout(&self) -> SampleLayout {
        self.format.layout()
    }

    /// `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// `width * height * channels`: one sample per pixel channel.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Largest sample value the raster may contain.
    pub(crate) fn max_sample(&self) -> u32 {
        self.maxval.unwrap_or(1)
    }

    /// Write the header as it appears at the top of the RLE output:
    /// magic, `width height`, then maxval if the format has one, each on
    /// its own line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.format.magic())?;
        writeln!(out, "{} {}", self.width, self.height)?;
        if let Some(maxval) = self.maxval {
            writeln!(out, "{maxval}")?;
        }
        Ok(())
    }

    /// Header text as written by [`PnmHeader::write_to`].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(24);
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }
}

/// Parse a header from the start of the stream, leaving the reader on the
/// first raster byte.
pub(crate) fn parse_header<R: BufRead>(reader: &mut ByteReader<R>) -> Result<PnmHeader, RleError> {
    let mut magic = [0u8; 2];
    let n = reader.read_block(&mut magic)?;
    if n < magic.len() {
        return Err(RleError::MalformedHeader(
            "input ends before the magic token".into(),
        ));
    }
    let format = PnmFormat::from_magic(magic).ok_or_else(|| {
        RleError::UnsupportedFormat(format!("magic token \"{}\"", magic.escape_ascii()))
    })?;

    let width = header_field(reader, "width")?;
    let height = header_field(reader, "height")?;
    let maxval = if format.layout().has_maxval() {
        Some(header_field(reader, "maxval")?)
    } else {
        None
    };

    // A single whitespace byte separates the header from the raster.
    match reader.next_byte()? {
        Some(b) if b.is_ascii_whitespace() => {}
        Some(b) => {
            return Err(RleError::MalformedHeader(format!(
                "expected whitespace after header, found {:?}",
                char::from(b)
            )));
        }
        None => {}
    }

    let header = PnmHeader::new(format, width, height, maxval)?;
    log::debug!(
        "parsed {} header: {}x{}, maxval {:?}",
        header.format.magic(),
        header.width,
        header.height,
        header.maxval
    );
    Ok(header)
}

fn header_field<R: BufRead>(reader: &mut ByteReader<R>, name: &str) -> Result<u32, RleError> {
    if reader.skip_separators()? == 0 {
        return Err(RleError::MalformedHeader(format!(
            "expected whitespace before {name}"
        )));
    }
    let value = reader
        .read_decimal()?
        .ok_or_else(|| RleError::MalformedHeader(format!("missing {name}")))?;
    u32::try_from(value)
        .map_err(|_| RleError::MalformedHeader(format!("{name} {value} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &[u8]) -> Result<PnmHeader, RleError> {
        parse_header(&mut ByteReader::new(data))
    }

    #[test]
    fn gray_header() {
        let h = parse(b"P5\n4 1\n255\n").unwrap();
        assert_eq!(h.format, PnmFormat::PgmBinary);
        assert_eq!((h.width, h.height, h.maxval), (4, 1, Some(255)));
        assert_eq!(h.sample_count(), 4);
    }

    #[test]
    fn bitmap_header_has_no_maxval() {
        let h = parse(b"P4 2 2\n").unwrap();
        assert_eq!(h.maxval, None);
        assert_eq!(h.to_bytes(), b"P4\n2 2\n");
    }

    #[test]
    fn color_sample_count_is_three_per_pixel() {
        let h = parse(b"P6 3 2 200 ").unwrap();
        assert_eq!(h.pixel_count(), 6);
        assert_eq!(h.sample_count(), 18);
    }

    #[test]
    fn comments_between_every_token() {
        let commented = parse(b"P2\n# a\n# b\n3\n#c\n 5 # d\n#e\n17\n").unwrap();
        let plain = parse(b"P2\n3 5\n17\n").unwrap();
        assert_eq!(commented, plain);
    }

    #[test]
    fn comment_directly_after_magic() {
        let h = parse(b"P5# made by hand\n1 1\n255\n").unwrap();
        assert_eq!((h.width, h.height), (1, 1));
    }

    #[test]
    fn leaves_reader_on_raster() {
        let mut reader = ByteReader::new(&b"P5\n1 1\n255\n\x20"[..]);
        parse_header(&mut reader).unwrap();
        // The raster byte is a space and must not be swallowed as a separator.
        assert_eq!(reader.next_byte().unwrap(), Some(b' '));
    }

    #[test]
    fn unsupported_magic() {
        assert!(matches!(
            parse(b"P9\n1 1\n"),
            Err(RleError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            parse(b"BM\x00\x00"),
            Err(RleError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn malformed_headers() {
        let cases: &[&[u8]] = &[
            b"",
            b"P",
            b"P5",
            b"P5\n",
            b"P5\nx 1\n255\n",
            b"P5\n1\n",
            b"P5\n1 1\n",
            b"P51 1\n255\n",
            b"P5\n1 1\n255x",
            b"P5\n99999999999 1\n255\n",
            b"P5\n1 1\n0\n",
        ];
        for data in cases {
            assert!(
                matches!(parse(data), Err(RleError::MalformedHeader(_))),
                "{:?} should be malformed",
                data.escape_ascii().to_string()
            );
        }
    }

    #[test]
    fn sixteen_bit_is_unsupported() {
        assert!(matches!(
            parse(b"P5\n1 1\n65535\n"),
            Err(RleError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn echo_includes_maxval_for_gray_and_color() {
        let h = PnmHeader::new(PnmFormat::PpmBinary, 1, 1, Some(255)).unwrap();
        assert_eq!(h.to_bytes(), b"P6\n1 1\n255\n");
        let h = PnmHeader::new(PnmFormat::PgmAscii, 10, 20, Some(15)).unwrap();
        assert_eq!(h.to_bytes(), b"P2\n10 20\n15\n");
    }

    #[test]
    fn zero_dimensions_are_accepted() {
        let h = parse(b"P5\n0 7\n255\n").unwrap();
        assert_eq!(h.sample_count(), 0);
    }
}
