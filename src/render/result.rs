//! Statistics over a rebuilt layout.

use crate::model::LayoutDocument;
use serde::{Deserialize, Serialize};

/// Statistics collected from a layout document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of documents merged into these statistics
    pub document_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of paragraphs hanging into the left margin
    pub hanging_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Largest space before any paragraph, in layout units
    pub max_spacing_before: u32,

    /// Smallest font size, in half-points
    pub min_font_size: Option<f32>,

    /// Largest font size, in half-points
    pub max_font_size: Option<f32>,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a document.
    pub fn from_document(doc: &LayoutDocument) -> Self {
        let mut stats = Self::new();
        stats.document_count = 1;
        for p in &doc.paragraphs {
            stats.paragraph_count += 1;
            if p.hangs_left() {
                stats.hanging_count += 1;
            }
            stats.max_spacing_before = stats.max_spacing_before.max(p.spacing_before_units);
            stats.observe_font_size(p.font_size_units);
            stats.count_text(&p.text);
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    fn observe_font_size(&mut self, size: f32) {
        self.min_font_size = Some(self.min_font_size.map_or(size, |m| m.min(size)));
        self.max_font_size = Some(self.max_font_size.map_or(size, |m| m.max(size)));
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &LayoutStats) {
        self.document_count += other.document_count;
        self.paragraph_count += other.paragraph_count;
        self.hanging_count += other.hanging_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
        self.max_spacing_before = self.max_spacing_before.max(other.max_spacing_before);
        if let Some(size) = other.min_font_size {
            self.observe_font_size(size);
        }
        if let Some(size) = other.max_font_size {
            self.observe_font_size(size);
        }
    }
}
