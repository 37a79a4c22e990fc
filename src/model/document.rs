//! Document-level types.

use super::{PageSpec, ParagraphPlacement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rebuilt document: one page and its paragraphs in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Document metadata (title, source image, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Page geometry
    pub page: PageSpec,

    /// Paragraph placements, one per recognized token
    pub paragraphs: Vec<ParagraphPlacement>,
}

impl LayoutDocument {
    /// Create a new document.
    pub fn new(page: PageSpec, paragraphs: Vec<ParagraphPlacement>) -> Self {
        Self {
            metadata: Metadata::default(),
            page,
            paragraphs,
        }
    }

    /// Replace the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get the number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content, one paragraph per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Source image file name
    pub source: Option<String>,

    /// Source image width in pixels
    pub image_width: u32,

    /// Source image height in pixels
    pub image_height: u32,

    /// Provider log id of the recognition call
    pub log_id: Option<u64>,

    /// Provider-reported image direction (0 = upright)
    pub direction: Option<i32>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata for an image of the given size.
    pub fn with_image(width: u32, height: u32) -> Self {
        Self {
            image_width: width,
            image_height: height,
            ..Default::default()
        }
    }

    /// Stamp the creation date with the current time.
    pub fn stamped(mut self) -> Self {
        self.created = Some(Utc::now());
        self
    }

    /// Title to write into the output, falling back to the source name.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.source.as_deref())
    }

    /// Check if the provider reported a rotated image.
    pub fn is_rotated(&self) -> bool {
        matches!(self.direction, Some(d) if d > 0)
    }
}
