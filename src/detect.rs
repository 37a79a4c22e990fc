//! Source image detection and dimension probing.
//!
//! Only the image header is decoded; pixel data is never loaded.

use crate::error::{Error, Result};
use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// Basic facts about a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Detected container format
    pub format: ImageFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageInfo {
    /// MIME type of the detected format.
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl std::fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}x{}", self.format, self.width, self.height)
    }
}

/// Detect format and dimensions of an image file.
///
/// # Example
/// ```no_run
/// use ocr2docx::detect::detect_image_from_path;
///
/// let info = detect_image_from_path("scan.png").unwrap();
/// println!("{}x{}", info.width, info.height);
/// ```
pub fn detect_image_from_path<P: AsRef<Path>>(path: P) -> Result<ImageInfo> {
    let reader = ImageReader::open(path.as_ref())?.with_guessed_format()?;
    let format = reader.format().ok_or(Error::UnknownFormat)?;
    let (width, height) = reader.into_dimensions()?;
    checked_info(format, width, height)
}

/// Detect format and dimensions of an in-memory image.
pub fn detect_image_from_bytes(data: &[u8]) -> Result<ImageInfo> {
    let format = image::guess_format(data).map_err(|_| Error::UnknownFormat)?;
    let reader = ImageReader::with_format(Cursor::new(data), format);
    let (width, height) = reader.into_dimensions()?;
    checked_info(format, width, height)
}

/// Check if bytes start with the signature of a recognised image format.
pub fn is_supported_image(data: &[u8]) -> bool {
    image::guess_format(data).is_ok()
}

fn checked_info(format: ImageFormat, width: u32, height: u32) -> Result<ImageInfo> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidImageDimensions { width, height });
    }
    log::debug!("Detected {:?} image {}x{}", format, width, height);
    Ok(ImageInfo {
        format,
        width,
        height,
    })
}
