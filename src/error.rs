use std::io;
use std::path::PathBuf;

use enough::StopReason;

/// Errors from reading a Netpbm image and writing its RLE stream.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RleError {
    #[error("cannot open input file {}: {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output file {}: {source}", .path.display())]
    OutputNotCreatable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("invalid sample data: {0}")]
    InvalidSample(String),

    #[error("truncated input: read {read} of {expected} {unit}")]
    TruncatedInput {
        read: usize,
        expected: usize,
        unit: &'static str,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("failed to allocate {0} bytes for the sample buffer")]
    AllocationFailed(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for RleError {
    fn from(r: StopReason) -> Self {
        RleError::Cancelled(r)
    }
}
