//! Geometry kernel for box annotations.
//!
//! Pure value types and functions, no state:
//! - `Point` and `Rect` in display-space units
//! - rectangle normalization and clamping (`bounded_box`)
//! - the eight resize control points of a rectangle (`control_points`)
//! - the `Handle` enumeration that maps each control point to the
//!   rectangle fields it drives

use serde::{Deserialize, Serialize};

/// A 2D point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both axis offsets to `other` are strictly below `tolerance`.
    pub fn within_square(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

/// An axis-aligned rectangle given by two corners.
///
/// The corners are not required to be sorted: while a box is being dragged
/// `x1` may exceed `x2`. Call [`Rect::normalized`] before comparing extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a rectangle spanning two corner points, keeping their order.
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Return the same rectangle with `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Signed width (`x2 - x1`).
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Signed height (`y2 - y1`).
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Check if a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: &Point) -> bool {
        let r = self.normalized();
        point.x >= r.x1 && point.x <= r.x2 && point.y >= r.y1 && point.y <= r.y2
    }

    /// Check if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let o = other.normalized();
        self.contains(&Point::new(o.x1, o.y1)) && self.contains(&Point::new(o.x2, o.y2))
    }

    /// Clamp a point into this rectangle.
    pub fn clamp_point(&self, point: Point) -> Point {
        let r = self.normalized();
        Point::new(clamp(point.x, r.x1, r.x2), clamp(point.y, r.y1, r.y2))
    }

    /// Clamp each of the four fields independently into `bounds`.
    ///
    /// The corner order is preserved, so an inverted rectangle stays inverted.
    pub fn clamp_fields(&mut self, bounds: &Rect) {
        let b = bounds.normalized();
        self.x1 = clamp(self.x1, b.x1, b.x2);
        self.y1 = clamp(self.y1, b.y1, b.y2);
        self.x2 = clamp(self.x2, b.x1, b.x2);
        self.y2 = clamp(self.y2, b.y1, b.y2);
    }
}

// Min-of-max rather than `f64::clamp`, which panics on an inverted range.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Intersect a (possibly unsorted) rectangle with `bounds`.
///
/// The result is normalized and lies fully inside `bounds`. A rectangle that
/// lies completely outside collapses onto the nearest edge of `bounds`.
pub fn bounded_box(rect: &Rect, bounds: &Rect) -> Rect {
    let mut r = rect.normalized();
    r.clamp_fields(bounds);
    r
}

/// The eight control points of a rectangle.
///
/// Order: top-left, top-right, bottom-left, bottom-right, top-mid,
/// bottom-mid, left-mid, right-mid. [`Handle::ALL`] follows the same order.
pub fn control_points(rect: &Rect) -> [Point; 8] {
    let Rect { x1, y1, x2, y2 } = *rect;
    let mid_x = (x1 + x2) / 2.0;
    let mid_y = (y1 + y2) / 2.0;
    [
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x1, y2),
        Point::new(x2, y2),
        Point::new(mid_x, y1),
        Point::new(mid_x, y2),
        Point::new(x1, mid_y),
        Point::new(x2, mid_y),
    ]
}

/// A resize handle of a box: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    /// Top-left corner, drives `x1` and `y1`
    NorthWest,
    /// Top-right corner, drives `x2` and `y1`
    NorthEast,
    /// Bottom-left corner, drives `x1` and `y2`
    SouthWest,
    /// Bottom-right corner, drives `x2` and `y2`
    SouthEast,
    /// Top edge midpoint, drives `y1`
    North,
    /// Bottom edge midpoint, drives `y2`
    South,
    /// Left edge midpoint, drives `x1`
    West,
    /// Right edge midpoint, drives `x2`
    East,
}

impl Handle {
    /// All handles in control-point order.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
        Handle::North,
        Handle::South,
        Handle::West,
        Handle::East,
    ];

    /// Position of this handle in [`control_points`] order.
    pub fn index(self) -> usize {
        match self {
            Handle::NorthWest => 0,
            Handle::NorthEast => 1,
            Handle::SouthWest => 2,
            Handle::SouthEast => 3,
            Handle::North => 4,
            Handle::South => 5,
            Handle::West => 6,
            Handle::East => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<Handle> {
        Self::ALL.get(index).copied()
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::NorthWest | Handle::NorthEast | Handle::SouthWest | Handle::SouthEast
        )
    }

    /// The control point of `rect` this handle sits on.
    pub fn position(self, rect: &Rect) -> Point {
        control_points(rect)[self.index()]
    }

    /// Move the fields this handle drives to `point`. Other fields are untouched.
    pub fn apply(self, rect: &mut Rect, point: Point) {
        match self {
            Handle::NorthWest => {
                rect.x1 = point.x;
                rect.y1 = point.y;
            }
            Handle::NorthEast => {
                rect.x2 = point.x;
                rect.y1 = point.y;
            }
            Handle::SouthWest => {
                rect.x1 = point.x;
                rect.y2 = point.y;
            }
            Handle::SouthEast => {
                rect.x2 = point.x;
                rect.y2 = point.y;
            }
            Handle::North => rect.y1 = point.y,
            Handle::South => rect.y2 = point.y,
            Handle::West => rect.x1 = point.x,
            Handle::East => rect.x2 = point.x,
        }
    }
}
