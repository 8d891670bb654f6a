use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Tolerance below which two segments are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-9;

/// A straight line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment2d {
    start: Point2d,
    end: Point2d,
}

impl LineSegment2d {
    /// Creates a line segment from its two end points.
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { start, end }
    }

    /// Creates the segment travelled from `origin` along `dir` for `length` metres.
    pub fn from_ray(origin: Point2d, dir: Vector2d, length: f64) -> Self {
        Self::from_ends(origin, origin + dir.normalize_to(length))
    }

    /// The length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Finds the point where two segments cross, if they do.
    /// Parallel and collinear segments never intersect.
    pub fn intersect(&self, other: &LineSegment2d) -> Option<Point2d> {
        let r = self.end - self.start;
        let s = other.end - other.start;
        let denom = r.perp_dot(s);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let qp = other.start - self.start;
        let t = qp.perp_dot(s) / denom;
        let u = qp.perp_dot(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.start + r * t)
        } else {
            None
        }
    }
}
