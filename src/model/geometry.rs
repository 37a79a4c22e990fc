//! Pixel-space geometry reported by the recognition provider.

use serde::{Deserialize, Serialize};

/// A pixel coordinate in the source image (origin at the top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel position
    pub x: i32,

    /// Vertical pixel position (grows downwards)
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of a token, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub left: i32,

    /// Top edge (measured from the image top)
    pub top: i32,

    /// Box width
    pub width: i32,

    /// Box height
    pub height: i32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (exclusive), saturating on absurd sizes.
    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge (exclusive), saturating on absurd sizes.
    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }
}

/// Number of corners a well-formed quadrilateral carries.
pub const QUAD_CORNERS: usize = 4;

/// Four-corner outline of a token: top-left, top-right, bottom-right, bottom-left.
///
/// The corner order is fixed by the provider and never re-sorted. Provider
/// payloads are not trusted to carry exactly four points, so the points are
/// kept as received and checked with [`Quadrilateral::corners`] before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quadrilateral(Vec<Point>);

impl Quadrilateral {
    /// Create a quadrilateral from its four corners in canonical order.
    pub fn new(top_left: Point, top_right: Point, bottom_right: Point, bottom_left: Point) -> Self {
        Self(vec![top_left, top_right, bottom_right, bottom_left])
    }

    /// Wrap points exactly as received, without checking the corner count.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Quadrilateral spanning an axis-aligned box.
    pub fn from_box(bbox: &BoundingBox) -> Self {
        Self::new(
            Point::new(bbox.left, bbox.top),
            Point::new(bbox.right(), bbox.top),
            Point::new(bbox.right(), bbox.bottom()),
            Point::new(bbox.left, bbox.bottom()),
        )
    }

    /// All points as received.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no points were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the quadrilateral has exactly four corners.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == QUAD_CORNERS
    }

    /// The four corners, or `None` when the point count is not four.
    pub fn corners(&self) -> Option<&[Point; QUAD_CORNERS]> {
        self.0.as_slice().try_into().ok()
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Option<Point> {
        self.corners().map(|c| c[0])
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Option<Point> {
        self.corners().map(|c| c[1])
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Option<Point> {
        self.corners().map(|c| c[2])
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Option<Point> {
        self.corners().map(|c| c[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_edges() {
        let bbox = BoundingBox::new(50, 10, 40, 30);
        assert_eq!(bbox.right(), 90);
        assert_eq!(bbox.bottom(), 40);

        let huge = BoundingBox::new(i32::MAX - 5, i32::MAX - 5, 100, 100);
        assert_eq!(huge.right(), i32::MAX);
        assert_eq!(huge.bottom(), i32::MAX);
    }

    #[test]
    fn test_quad_from_box_corner_order() {
        let quad = Quadrilateral::from_box(&BoundingBox::new(50, 10, 40, 30));
        assert!(quad.is_well_formed());
        assert_eq!(quad.top_left(), Some(Point::new(50, 10)));
        assert_eq!(quad.top_right(), Some(Point::new(90, 10)));
        assert_eq!(quad.bottom_right(), Some(Point::new(90, 40)));
        assert_eq!(quad.bottom_left(), Some(Point::new(50, 40)));
    }

    #[test]
    fn test_quad_wrong_point_count() {
        let quad = Quadrilateral::from_points(vec![(0, 0).into(), (1, 0).into(), (1, 1).into()]);
        assert!(!quad.is_well_formed());
        assert_eq!(quad.len(), 3);
        assert!(quad.corners().is_none());
        assert!(quad.top_left().is_none());
    }

    #[test]
    fn test_quad_serializes_as_point_list() {
        let quad = Quadrilateral::from_box(&BoundingBox::new(0, 0, 2, 2));
        let json = serde_json::to_string(&quad).unwrap();
        assert!(json.starts_with("[{\"x\":0,\"y\":0}"));

        let back: Quadrilateral = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quad);
    }
}
