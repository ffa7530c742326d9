use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use enough::Stop;

use crate::error::RleError;
use crate::limits::Limits;
use crate::pnm::reader::ByteReader;
use crate::pnm::{self, BitmapMode, PnmHeader, SampleBuffer};
use crate::rle::{self, RlePacket};

/// Result of one successful conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressSummary {
    pub header: PnmHeader,
    /// Samples encoded (sum of all packet counts).
    pub samples: usize,
    pub packets: usize,
    /// Header plus packet bytes.
    pub bytes_written: u64,
}

/// Builder for a Netpbm-to-RLE conversion.
///
/// ```no_run
/// use pnmrle::{BitmapMode, CompressRequest, Limits, Unstoppable};
///
/// let limits = Limits { max_pixels: Some(100_000_000), ..Default::default() };
/// let summary = CompressRequest::new()
///     .with_limits(&limits)
///     .with_bitmap_mode(BitmapMode::Unpacked)
///     .compress_file("in.pgm", "out.rle", Unstoppable)?;
/// println!("{} packets", summary.packets);
/// # Ok::<(), pnmrle::RleError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CompressRequest<'a> {
    limits: Option<&'a Limits>,
    bitmap_mode: BitmapMode,
}

impl<'a> CompressRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply resource limits before the sample buffer is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Choose how P4 rasters are turned into samples.
    pub fn with_bitmap_mode(mut self, mode: BitmapMode) -> Self {
        self.bitmap_mode = mode;
        self
    }

    /// Parse the header and load every sample of the raster.
    pub fn read_image<R: BufRead>(
        &self,
        input: R,
        stop: impl Stop,
    ) -> Result<(PnmHeader, SampleBuffer), RleError> {
        self.load(input, &stop)
    }

    /// Read a Netpbm image from `input` and write its RLE form to `output`.
    ///
    /// Nothing is written unless the whole raster loads.
    pub fn compress<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
        stop: impl Stop,
    ) -> Result<CompressSummary, RleError> {
        let (header, samples) = self.load(input, &stop)?;
        let summary = encode(header, &samples, &mut output, &stop)?;
        output.flush()?;
        Ok(summary)
    }

    /// File-to-file conversion.
    ///
    /// The output file is created only after the input has been fully read,
    /// so an unsupported, malformed, or truncated input leaves no output
    /// behind. A write failure can still leave a partial file.
    pub fn compress_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<CompressSummary, RleError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let file = File::open(input).map_err(|source| RleError::InputNotFound {
            path: input.to_path_buf(),
            source,
        })?;
        let (header, samples) = self.load(BufReader::new(file), &stop)?;

        let file = File::create(output).map_err(|source| RleError::OutputNotCreatable {
            path: output.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let summary = encode(header, &samples, &mut writer, &stop)?;
        writer.flush()?;
        log::debug!(
            "{} -> {}: {} bytes",
            input.display(),
            output.display(),
            summary.bytes_written
        );
        Ok(summary)
    }

    fn load<R: BufRead>(
        &self,
        input: R,
        stop: &dyn Stop,
    ) -> Result<(PnmHeader, SampleBuffer), RleError> {
        let mut reader = ByteReader::new(input);
        let header = pnm::parse_header(&mut reader)?;
        let samples =
            pnm::load_samples(&mut reader, &header, self.bitmap_mode, self.limits, stop)?;
        Ok((header, samples))
    }
}

/// Write the echoed header followed by the packet stream for `samples`.
pub fn write_rle<W: Write>(
    header: PnmHeader,
    samples: &SampleBuffer,
    output: &mut W,
    stop: impl Stop,
) -> Result<CompressSummary, RleError> {
    encode(header, samples, output, &stop)
}

fn encode<W: Write>(
    header: PnmHeader,
    samples: &SampleBuffer,
    output: &mut W,
    stop: &dyn Stop,
) -> Result<CompressSummary, RleError> {
    let header_bytes = header.to_bytes();
    output.write_all(&header_bytes)?;
    let stats = rle::write_packets(samples.as_slice(), output, stop)?;
    let bytes_written = header_bytes.len() as u64 + (stats.packets * RlePacket::SIZE) as u64;
    Ok(CompressSummary {
        header,
        samples: stats.samples,
        packets: stats.packets,
        bytes_written,
    })
}
