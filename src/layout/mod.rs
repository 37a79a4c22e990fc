//! Layout reconstruction from positioned recognition output.

mod engine;
mod options;

pub use engine::{
    LayoutEngine, LEFT_MARGIN_OFFSET, PAGE_WIDTH_PADDING, TOP_MARGIN_OFFSET, UNITS_PER_PIXEL,
};
pub use options::{GapMode, LayoutOptions, OverlapSpacing};
