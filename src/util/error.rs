//! Error types for snapocr.

use thiserror::Error;

/// Result alias for snapocr operations.
pub type OcrResult<T> = std::result::Result<T, OcrError>;

/// Errors that can occur while building templates or recognizing text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OcrError {
    /// Width or height is zero, or the pixel count overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not hold enough elements.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not fit inside the image.
    #[error(
        "roi ({x}, {y}) {width}x{height} out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A constrained match was requested with no candidate characters.
    #[error("candidate set is empty")]
    EmptyCandidateSet,
    /// A font file could not be read or parsed.
    #[error("failed to load font {name}: {reason}")]
    FontLoad { name: String, reason: String },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
