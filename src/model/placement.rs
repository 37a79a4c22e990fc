//! Paragraph placements produced by the layout engine.

use serde::{Deserialize, Serialize};

/// Typographic placement of one token, in layout units.
///
/// A document writer renders one paragraph per placement, in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphPlacement {
    /// Paragraph text, verbatim from the token
    pub text: String,

    /// Left indentation relative to the printable area.
    ///
    /// Negative values hang into the left margin.
    pub indentation_units: i32,

    /// Space before the paragraph (never negative)
    pub spacing_before_units: u32,

    /// Font size in half-points
    pub font_size_units: f32,
}

impl ParagraphPlacement {
    /// Create a new placement.
    pub fn new(
        text: impl Into<String>,
        indentation_units: i32,
        spacing_before_units: u32,
        font_size_units: f32,
    ) -> Self {
        Self {
            text: text.into(),
            indentation_units,
            spacing_before_units,
            font_size_units,
        }
    }

    /// Check if the paragraph hangs into the left margin.
    pub fn hangs_left(&self) -> bool {
        self.indentation_units < 0
    }

    /// Font size in points.
    pub fn font_size_points(&self) -> f32 {
        self.font_size_units / 2.0
    }

    /// Font size as a whole number of half-points, rounded to nearest.
    pub fn font_size_half_points(&self) -> u32 {
        self.font_size_units.max(0.0).round() as u32
    }

    /// Check if the placement carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
