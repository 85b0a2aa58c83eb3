//! Boundary clamp

use tikus_domain::{Point, ScreenBounds};

/// Restrict `point` to `bounds`, each axis independently
///
/// NaN coordinates collapse to the lower bound.
pub fn clamp(point: Point, bounds: ScreenBounds) -> Point {
    Point::new(
        point.x.max(bounds.min_x).min(bounds.max_x),
        point.y.max(bounds.min_y).min(bounds.max_y),
    )
}
