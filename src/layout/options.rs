//! Layout options and configuration.

/// Options for the layout engine.
///
/// The unit conversion constants are fixed; these switches only select
/// between the legacy and the simplified pixel arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// How the vertical gap between lines is measured
    pub gap_mode: GapMode,

    /// How a negative gap (overlapping boxes) turns into spacing
    pub overlap_spacing: OverlapSpacing,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set gap mode.
    pub fn with_gap_mode(mut self, mode: GapMode) -> Self {
        self.gap_mode = mode;
        self
    }

    /// Reproduce the legacy single-precision rescale of gaps and left edges.
    pub fn legacy_rescale(mut self) -> Self {
        self.gap_mode = GapMode::LegacyRescale;
        self
    }

    /// Set overlap spacing policy.
    pub fn with_overlap_spacing(mut self, policy: OverlapSpacing) -> Self {
        self.overlap_spacing = policy;
        self
    }

    /// Give overlapping lines zero spacing instead of their overlap height.
    pub fn collapse_overlaps(mut self) -> Self {
        self.overlap_spacing = OverlapSpacing::Collapse;
        self
    }
}

/// Pixel arithmetic for gaps and left edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GapMode {
    /// Use pixel values as is
    #[default]
    Direct,

    /// Redo the legacy converter's `f32` round trips.
    ///
    /// Gaps go through `gap / image_height * image_height` and are truncated
    /// after scaling; left edges go through `left / image_width * image_width`
    /// and are truncated before scaling. Indentation and spacing then match
    /// legacy documents exactly when laid out with [`LayoutEngine::layout`].
    /// Run sizes are not affected.
    ///
    /// [`LayoutEngine::layout`]: super::LayoutEngine::layout
    LegacyRescale,
}

/// Spacing policy for lines whose box starts above the previous line's bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapSpacing {
    /// Spacing is the magnitude of the gap, so overlaps still add space
    #[default]
    Absolute,

    /// Overlaps produce zero spacing
    Collapse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.gap_mode, GapMode::Direct);
        assert_eq!(options.overlap_spacing, OverlapSpacing::Absolute);
    }

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new().legacy_rescale().collapse_overlaps();
        assert_eq!(options.gap_mode, GapMode::LegacyRescale);
        assert_eq!(options.overlap_spacing, OverlapSpacing::Collapse);
    }
}
