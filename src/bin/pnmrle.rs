//! pnmrle CLI - Netpbm to RLE converter
//!
//! Reads a P1-P6 image and writes its header followed by run-length
//! packets.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

use pnmrle::{BitmapMode, CompressRequest, Limits, Unstoppable};

/// Run-length encode a Netpbm (PBM/PGM/PPM) image.
#[derive(Parser, Debug)]
#[command(name = "pnmrle")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image (P1-P6)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output RLE file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Encode P4 raster bytes as-is instead of one sample per pixel
    #[arg(long)]
    packed_bitmap: bool,

    /// Refuse images wider or taller than this
    #[arg(long, value_name = "N")]
    max_side: Option<u32>,

    /// Refuse images with more than this many pixels
    #[arg(long, value_name = "N")]
    max_pixels: Option<u64>,

    /// Refuse images whose sample buffer exceeds this many bytes
    #[arg(long, value_name = "BYTES")]
    max_memory: Option<u64>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), pnmrle::RleError> {
    let limits = Limits {
        max_side: args.max_side,
        max_pixels: args.max_pixels,
        max_memory_bytes: args.max_memory,
    };
    let mode = if args.packed_bitmap {
        BitmapMode::PackedBytes
    } else {
        BitmapMode::Unpacked
    };

    let summary = CompressRequest::new()
        .with_limits(&limits)
        .with_bitmap_mode(mode)
        .compress_file(&args.input, &args.output, Unstoppable)?;

    let header = &summary.header;
    log::debug!("Input: {:?}", args.input);
    log::debug!("  Format: {}", header.format.magic());
    log::debug!("  Dimensions: {}x{}", header.width, header.height);
    if let Some(maxval) = header.maxval {
        log::debug!("  Maxval: {maxval}");
    }
    log::debug!("Output: {:?}", args.output);
    log::debug!("  Samples: {}", summary.samples);
    log::debug!("  Packets: {}", summary.packets);
    log::debug!("  Size: {} bytes", summary.bytes_written);
    Ok(())
}
