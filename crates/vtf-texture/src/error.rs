//! Error types for VTF decoding.

use thiserror::Error;

use crate::format::ImageFormat;

/// Errors that can occur when decoding a VTF file.
///
/// Every error is terminal for the decode call that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A read ran past the end of the buffer.
    #[error("{0}")]
    Read(#[from] vtf_common::Error),

    /// Bad signature or impossible header field.
    #[error("malformed VTF header: {0}")]
    MalformedHeader(String),

    /// Declared image data extends past the end of the buffer.
    #[error("truncated VTF data: needed {needed} bytes but only {available} available")]
    TruncatedBuffer { needed: usize, available: usize },

    /// The pixel format has no decoder.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(ImageFormat),

    /// The dimensions cannot be decoded in this format.
    #[error("unsupported dimensions {width}x{height} for {format}")]
    UnsupportedDimensions {
        format: ImageFormat,
        width: u32,
        height: u32,
    },
}

impl Error {
    /// Whether this error comes from a read past the end of the buffer.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::Read(vtf_common::Error::OutOfBounds { .. }))
    }
}

/// Result type for VTF operations.
pub type Result<T> = std::result::Result<T, Error>;
