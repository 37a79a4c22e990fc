//! Rendering options and configuration.

use super::{JsonFormat, PackageCompression};

/// Options for rendering a layout document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Font family for every run (the consumer's default font when `None`)
    pub font_family: Option<String>,

    /// Title written into document properties, overriding the metadata
    pub title: Option<String>,

    /// JSON output layout
    pub json_format: JsonFormat,

    /// Write document properties into DOCX packages and the `metadata`
    /// member into JSON
    pub include_metadata: bool,

    /// Zip compression for DOCX parts
    pub compression: PackageCompression,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Enable or disable document properties.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Set package compression.
    pub fn with_compression(mut self, compression: PackageCompression) -> Self {
        self.compression = compression;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_family: None,
            title: None,
            json_format: JsonFormat::Pretty,
            include_metadata: true,
            compression: PackageCompression::Deflated,
        }
    }
}
