//! Screen geometry
//!
//! Coordinates are kept as `f64` end to end. Parametric patterns (circle,
//! figure-8) only close their loops exactly when intermediate positions are
//! not rounded, so conversion to integer pixels is left to the backend.

use serde::{Deserialize, Serialize};

/// A position on the virtual desktop
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point displaced by `offset`
    #[must_use]
    pub fn offset_by(self, offset: Offset) -> Self {
        Self { x: self.x + offset.dx, y: self.y + offset.dy }
    }

    /// Offset that takes `self` to `other`
    #[must_use]
    pub fn delta_to(self, other: Point) -> Offset {
        Offset::new(other.x - self.x, other.y - self.y)
    }

    /// Euclidean distance between two points
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        self.delta_to(other).magnitude()
    }
}

/// A relative cursor displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    /// The no-movement offset
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length of the step
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Usable area of one monitor, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ScreenBounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Monitor anchored at `(x, y)` with the given pixel size
    ///
    /// Pixel coordinates run from `x` to `x + width - 1`.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + (width - 1.0).max(0.0), y + (height - 1.0).max(0.0))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Whether `min <= max` holds on both axes
    pub fn is_ordered(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Whether `point` lies inside, edges included
    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    /// Distance from `point` to the nearest edge; zero when inside
    pub fn distance_to(&self, point: Point) -> f64 {
        let dx = (self.min_x - point.x).max(0.0).max(point.x - self.max_x);
        let dy = (self.min_y - point.y).max(0.0).max(point.y - self.max_y);
        dx.hypot(dy)
    }
}
