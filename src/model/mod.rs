//! Document model types for rebuilt scans.
//!
//! This module defines the pixel-space input the recognition provider
//! reports (points, boxes, quadrilaterals, tokens) and the layout-unit
//! output the renderers consume (page spec, paragraph placements). The
//! model is format-agnostic: every output writer reads the same
//! [`LayoutDocument`].

mod document;
mod geometry;
mod page;
mod placement;
mod token;

pub use document::{LayoutDocument, Metadata};
pub use geometry::{BoundingBox, Point, Quadrilateral, QUAD_CORNERS};
pub use page::{Orientation, PageSpec};
pub use placement::ParagraphPlacement;
pub use token::{Token, TokenSequence};
