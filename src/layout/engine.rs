//! Geometric-to-typographic mapping of recognized tokens.
//!
//! Pixel measurements become layout units (twentieths of a point) through a
//! fixed multiplier. Indentation and the first line's spacing are corrected
//! by the page margins so that text lands where it sat in the source image.

use crate::error::{Error, Result};
use crate::model::{LayoutDocument, Metadata, Orientation, PageSpec, ParagraphPlacement, TokenSequence};

use super::{GapMode, LayoutOptions, OverlapSpacing};

/// Layout units per source pixel.
pub const UNITS_PER_PIXEL: i64 = 20;

/// Default left page margin, subtracted from every indentation.
pub const LEFT_MARGIN_OFFSET: i64 = 1764;

/// Default top page margin, subtracted from the first line's spacing.
pub const TOP_MARGIN_OFFSET: i64 = 1397;

/// Fixed padding added to the page width.
pub const PAGE_WIDTH_PADDING: u64 = 200;

/// Layout engine mapping pixel geometry to paragraph placements.
///
/// The engine holds no state besides its options; the same inputs always
/// yield the same output, and one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Get the engine options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Compute the page geometry for an image of the given pixel size.
    ///
    /// The page is always landscape. Zero-sized images are rejected.
    pub fn compute_page_spec(&self, image_width: u32, image_height: u32) -> Result<PageSpec> {
        if image_width == 0 || image_height == 0 {
            return Err(Error::InvalidImageDimensions {
                width: image_width,
                height: image_height,
            });
        }

        let width_units = u64::from(image_width) * UNITS_PER_PIXEL as u64 + PAGE_WIDTH_PADDING;
        let height_units = u64::from(image_height) * UNITS_PER_PIXEL as u64 + TOP_MARGIN_OFFSET as u64;

        Ok(PageSpec::new(width_units, height_units, Orientation::Landscape))
    }

    /// Compute one placement per token, in input order.
    ///
    /// Each token's quadrilateral is checked before its placement is
    /// computed; a malformed one aborts the whole computation and no
    /// placements are returned.
    ///
    /// [`GapMode::LegacyRescale`] also rescales left edges by the image
    /// width, which only [`layout`](Self::layout) knows; here they are taken
    /// as is.
    pub fn compute_placements(
        &self,
        tokens: &TokenSequence,
        image_height: u32,
    ) -> Result<Vec<ParagraphPlacement>> {
        self.place(tokens, None, image_height)
    }

    fn place(
        &self,
        tokens: &TokenSequence,
        image_width: Option<u32>,
        image_height: u32,
    ) -> Result<Vec<ParagraphPlacement>> {
        let mut placements = Vec::with_capacity(tokens.len());
        let mut previous_bottom: Option<i32> = None;

        for (index, token) in tokens.iter().enumerate() {
            let corners = token
                .quadrilateral
                .corners()
                .ok_or(Error::MalformedQuadrilateral {
                    index,
                    points: token.quadrilateral.len(),
                })?;

            let top_y = corners[0].y;
            let bottom_y = corners[3].y;

            let spacing_before = match previous_bottom {
                None => {
                    let first_top = i64::from(top_y).abs() * UNITS_PER_PIXEL;
                    (first_top - TOP_MARGIN_OFFSET).max(0)
                }
                Some(prev_bottom) => {
                    let raw_gap = i64::from(top_y) - i64::from(prev_bottom);
                    if raw_gap < 0 {
                        log::warn!(
                            "Token {} overlaps the previous line by {}px",
                            index,
                            -raw_gap
                        );
                    }
                    self.gap_spacing(raw_gap, image_height)
                }
            };

            let indentation =
                self.left_units(token.bounding_box.left, image_width) - LEFT_MARGIN_OFFSET;
            let font_size = token.bounding_box.height as f32 * 3.0 / 4.0;

            log::debug!(
                "Token {}: indent={} spacing={} size={}",
                index,
                indentation,
                spacing_before,
                font_size
            );

            placements.push(ParagraphPlacement::new(
                token.text.clone(),
                saturate_i32(indentation),
                saturate_u32(spacing_before),
                font_size,
            ));
            previous_bottom = Some(bottom_y);
        }

        Ok(placements)
    }

    /// Lay out a whole page: page geometry plus placements.
    pub fn layout(
        &self,
        image_width: u32,
        image_height: u32,
        tokens: &TokenSequence,
    ) -> Result<LayoutDocument> {
        let page = self.compute_page_spec(image_width, image_height)?;
        let paragraphs = self.place(tokens, Some(image_width), image_height)?;

        log::debug!(
            "Laid out {} paragraphs on a {}x{} page",
            paragraphs.len(),
            page.width_units,
            page.height_units
        );

        Ok(LayoutDocument::new(page, paragraphs)
            .with_metadata(Metadata::with_image(image_width, image_height)))
    }

    /// Left edge in layout units.
    fn left_units(&self, left: i32, image_width: Option<u32>) -> i64 {
        match (self.options.gap_mode, image_width) {
            (GapMode::LegacyRescale, Some(width)) => {
                let width = width as f32;
                let rescaled = left as f32 / width * width;
                // truncated before scaling, unlike gaps
                (rescaled.abs() as i64) * UNITS_PER_PIXEL
            }
            _ => i64::from(left).abs() * UNITS_PER_PIXEL,
        }
    }

    /// Spacing for a line after the first, from the gap to the line above.
    fn gap_spacing(&self, raw_gap: i64, image_height: u32) -> i64 {
        if raw_gap < 0 && self.options.overlap_spacing == OverlapSpacing::Collapse {
            return 0;
        }

        match self.options.gap_mode {
            GapMode::Direct => raw_gap.abs() * UNITS_PER_PIXEL,
            GapMode::LegacyRescale => {
                // A zero height gives NaN here, which casts to 0 exactly like
                // the legacy output.
                let height = image_height as f32;
                let rescaled = raw_gap as f32 / height * height;
                (rescaled.abs() * UNITS_PER_PIXEL as f32) as i64
            }
        }
    }
}

fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn saturate_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
