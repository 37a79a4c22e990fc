//! Error types for ocr2docx library.

use std::io;
use thiserror::Error;

/// Result type alias for ocr2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rebuilding a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error decoding the source image header.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error writing the zip container of a DOCX package.
    #[error("Package error: {0}")]
    Package(#[from] zip::result::ZipError),

    /// The file format is not recognized as a supported image.
    #[error("Unknown file format: not a supported image")]
    UnknownFormat,

    /// Image width or height is zero.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// A token's quadrilateral does not have exactly four corners.
    #[error("Malformed quadrilateral at token {index}: expected 4 points, found {points}")]
    MalformedQuadrilateral {
        /// Index of the offending token in the input sequence
        index: usize,
        /// Number of points the quadrilateral actually has
        points: usize,
    },

    /// The recognition provider answered with an error payload.
    #[error("Recognition provider error {code}: {message}")]
    Provider {
        /// Provider error code
        code: i64,
        /// Provider error message
        message: String,
    },

    /// The recognition response is unusable.
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// Error while rendering an output document.
    #[error("Rendering error: {0}")]
    Render(String),

    /// No renderer is registered for the requested output.
    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
