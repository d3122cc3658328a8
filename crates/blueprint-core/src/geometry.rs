//! Geometric primitives shared by the scene model and the drawables.
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate Systems
//!
//! The types here carry no axis orientation of their own. Two spaces use them:
//!
//! ```text
//!  scene space                     pixel space
//!
//!    +Y                              (0,0) ────────► +X
//!     ▲                                │
//!     │                                │
//!     │                                ▼
//!   (0,0) ────────► +X                +Y
//! ```
//!
//! Scenes are described in abstract units with the origin at the bottom-left
//! corner of the canvas. Drawables in [`crate::draw`] work in SVG pixel space
//! with the origin at the top-left corner. The renderer owns the mapping
//! between the two.

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use blueprint_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns true if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Treats the point as the center of a rectangle of the given size.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true when both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns a new Size grown by the given insets
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle described by its minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds spanning two corner points, in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from its minimum corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the minimum corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true if the point lies inside or on the edge of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns true if the two bounds share any interior area
    pub fn overlaps(self, other: Bounds) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use blueprint_core::geometry::{Bounds, Point, Size};
    /// let title = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let body = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = title.merge(&body);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds outward by the insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Finds where a ray leaving `origin` in the direction of `toward` crosses
    /// the edge of these bounds.
    ///
    /// Returns `origin` unchanged when it lies outside the bounds or when the
    /// two points coincide.
    ///
    /// # Examples
    ///
    /// ```
    /// # use blueprint_core::geometry::{Bounds, Point, Size};
    /// let node = Bounds::new_from_center(Point::new(8.0, 12.5), Size::new(3.0, 0.6));
    /// let exit = node.ray_exit(Point::new(8.0, 12.5), Point::new(8.0, 10.5));
    /// assert_eq!(exit.x(), 8.0);
    /// assert!((exit.y() - 12.2).abs() < 1e-5);
    /// ```
    pub fn ray_exit(self, origin: Point, toward: Point) -> Point {
        if !self.contains(origin) {
            return origin;
        }

        let direction = toward.sub_point(origin);
        if direction.is_zero() {
            return origin;
        }

        let along_x = if direction.x > 0.0 {
            (self.max_x - origin.x) / direction.x
        } else if direction.x < 0.0 {
            (self.min_x - origin.x) / direction.x
        } else {
            f32::INFINITY
        };
        let along_y = if direction.y > 0.0 {
            (self.max_y - origin.y) / direction.y
        } else if direction.y < 0.0 {
            (self.min_y - origin.y) / direction.y
        } else {
            f32::INFINITY
        };

        let t = along_x.min(along_y);
        if !t.is_finite() {
            return origin;
        }

        origin.add_point(direction.scale(t))
    }
}

/// Spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, -2.0);

        assert_eq!(a.add_point(b), Point::new(4.0, 2.0));
        assert_eq!(a.sub_point(b), Point::new(2.0, 6.0));
        assert_eq!(a.midpoint(b), Point::new(2.0, 1.0));
        assert_eq!(a.scale(2.0), Point::new(6.0, 8.0));
        assert_approx_eq!(f32, a.hypot(), 5.0);
        assert_approx_eq!(f32, a.distance(Point::new(0.0, 0.0)), 5.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(4.0, 2.0).is_positive());
        assert!(!Size::new(0.0, 2.0).is_positive());
        assert!(!Size::new(4.0, -1.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
        assert!(!Size::new(f32::INFINITY, 1.0).is_positive());
    }

    #[test]
    fn test_size_add_padding() {
        let size = Size::new(10.0, 20.0).add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_approx_eq!(f32, size.width(), 16.0);
        assert_approx_eq!(f32, size.height(), 24.0);
    }

    #[test]
    fn test_bounds_new_from_center() {
        let bounds = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(4.0, 2.0));
        assert_approx_eq!(f32, bounds.min_x(), 8.0);
        assert_approx_eq!(f32, bounds.max_x(), 12.0);
        assert_approx_eq!(f32, bounds.min_y(), 9.0);
        assert_approx_eq!(f32, bounds.max_y(), 11.0);
        assert_eq!(bounds.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_bounds_from_corners_any_order() {
        let a = Bounds::from_corners(Point::new(5.0, 1.0), Point::new(1.0, 5.0));
        let b = Bounds::from_corners(Point::new(1.0, 1.0), Point::new(5.0, 5.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_contains_includes_edges() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 5.0));
        assert!(bounds.contains(Point::new(0.0, 0.0)));
        assert!(bounds.contains(Point::new(10.0, 5.0)));
        assert!(bounds.contains(Point::new(4.0, 2.0)));
        assert!(!bounds.contains(Point::new(10.1, 2.0)));
        assert!(!bounds.contains(Point::new(4.0, -0.1)));
    }

    #[test]
    fn test_bounds_overlaps() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let touching = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(5.0, 5.0));
        assert!(a.overlaps(b));
        assert!(!a.overlaps(touching));
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0))
            .add_padding(Insets::uniform(5.0));
        assert_approx_eq!(f32, bounds.min_x(), 5.0);
        assert_approx_eq!(f32, bounds.min_y(), 15.0);
        assert_approx_eq!(f32, bounds.width(), 40.0);
        assert_approx_eq!(f32, bounds.height(), 50.0);
    }

    #[test]
    fn test_ray_exit_vertical() {
        let bounds = Bounds::new_from_center(Point::new(8.0, 10.5), Size::new(3.5, 0.8));
        let exit = bounds.ray_exit(Point::new(8.0, 10.5), Point::new(8.0, 12.5));
        assert_approx_eq!(f32, exit.x(), 8.0);
        assert_approx_eq!(f32, exit.y(), 10.9, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_exit_diagonal_hits_side() {
        let bounds = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(2.0, 10.0));
        let exit = bounds.ray_exit(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_approx_eq!(f32, exit.x(), 1.0);
        assert_approx_eq!(f32, exit.y(), 1.0);
    }

    #[test]
    fn test_ray_exit_degenerate_cases() {
        let bounds = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(2.0, 2.0));
        let origin = Point::new(0.0, 0.0);
        assert_eq!(bounds.ray_exit(origin, origin), origin);

        let outside = Point::new(5.0, 5.0);
        assert_eq!(bounds.ray_exit(outside, origin), outside);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.1f32..500.0, 0.1f32..500.0).prop_map(|(w, h)| Size::new(w, h))
    }

    proptest! {
        #[test]
        fn center_bounds_roundtrip_center(center in point_strategy(), size in size_strategy()) {
            let bounds = Bounds::new_from_center(center, size);
            let back = bounds.center();
            prop_assert!(approx_eq!(f32, back.x(), center.x(), epsilon = 1e-3));
            prop_assert!(approx_eq!(f32, back.y(), center.y(), epsilon = 1e-3));
            prop_assert!(approx_eq!(f32, bounds.width(), size.width(), epsilon = 1e-3));
            prop_assert!(approx_eq!(f32, bounds.height(), size.height(), epsilon = 1e-3));
        }

        #[test]
        fn merge_contains_both(a in point_strategy(), b in point_strategy(), size in size_strategy()) {
            let first = Bounds::new_from_center(a, size);
            let second = Bounds::new_from_center(b, size);
            let merged = first.merge(&second);
            prop_assert!(merged.contains(first.center()));
            prop_assert!(merged.contains(second.center()));
            prop_assert!(merged.width() >= first.width() - 1e-3);
        }

        #[test]
        fn ray_exit_lies_on_edge(size in size_strategy(), toward in point_strategy()) {
            let center = Point::new(0.0, 0.0);
            prop_assume!(!toward.is_zero());
            let bounds = Bounds::new_from_center(center, size);
            let exit = bounds.ray_exit(center, toward);

            let eps = 1e-2;
            let on_vertical_edge = approx_eq!(f32, exit.x(), bounds.min_x(), epsilon = eps)
                || approx_eq!(f32, exit.x(), bounds.max_x(), epsilon = eps);
            let on_horizontal_edge = approx_eq!(f32, exit.y(), bounds.min_y(), epsilon = eps)
                || approx_eq!(f32, exit.y(), bounds.max_y(), epsilon = eps);
            prop_assert!(on_vertical_edge || on_horizontal_edge);
            prop_assert!(bounds.add_padding(Insets::uniform(eps)).contains(exit));
        }
    }
}
