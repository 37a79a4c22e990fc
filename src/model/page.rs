//! Page-level types.

use serde::{Deserialize, Serialize};

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Portrait orientation
    Portrait,
    /// Landscape orientation (used for every rebuilt scan)
    #[default]
    Landscape,
}

impl Orientation {
    /// WordprocessingML attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Page dimensions and orientation, derived once per source image.
///
/// Dimensions are in layout units (twentieths of a point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Page width in layout units
    pub width_units: u64,

    /// Page height in layout units
    pub height_units: u64,

    /// Page orientation
    pub orientation: Orientation,
}

impl PageSpec {
    /// Create a new page spec.
    pub fn new(width_units: u64, height_units: u64, orientation: Orientation) -> Self {
        Self {
            width_units,
            height_units,
            orientation,
        }
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (u64, u64) {
        (self.width_units, self.height_units)
    }

    /// Page width in points.
    pub fn width_points(&self) -> f64 {
        self.width_units as f64 / 20.0
    }

    /// Page height in points.
    pub fn height_points(&self) -> f64 {
        self.height_units as f64 / 20.0
    }

    /// Check if the page is declared landscape.
    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_spec_points() {
        let page = PageSpec::new(20200, 13397, Orientation::Landscape);
        assert_eq!(page.dimensions(), (20200, 13397));
        assert_eq!(page.width_points(), 1010.0);
        assert!(page.is_landscape());
    }

    #[test]
    fn test_orientation_serde() {
        let json = serde_json::to_string(&Orientation::Landscape).unwrap();
        assert_eq!(json, "\"landscape\"");
        assert_eq!(Orientation::Portrait.as_str(), "portrait");
    }
}
