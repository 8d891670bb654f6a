//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use cone::{ConeCap, DangerCone};
pub use segment::LineSegment2d;
pub use util::*;

mod cone;
mod segment;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
