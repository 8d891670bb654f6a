use super::{Point2d, Vector2d};
use cgmath::prelude::*;
use std::f64::consts::PI;
use std::fmt;

/// Whether another object lies ahead of or behind a reference heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bearing {
    Ahead,
    Behind,
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bearing::Ahead => f.write_str("ahead of you"),
            Bearing::Behind => f.write_str("behind you"),
        }
    }
}

/// Projects a point onto a local coordinate system.
///
/// # Parameters
/// * `point` - The point to project
/// * `origin` - The origin of the coordinate system
/// * `x_axis` - The basis vector pointing in the positive x-axis.
/// * `y_axis` - The basis vector pointing in the positive y-axis.
pub fn project_local(
    point: Point2d,
    origin: Point2d,
    x_axis: Vector2d,
    y_axis: Vector2d,
) -> Point2d {
    let point = point - origin;
    Point2d::new(point.dot(x_axis), point.dot(y_axis))
}

/// Rotates a vector 90 degrees clockwise (screen coordinates, y pointing down).
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The unit vector pointing along `heading`, in radians.
pub fn unit_vector(heading: f64) -> Vector2d {
    Vector2d::new(heading.cos(), heading.sin())
}

/// Classifies `other` as ahead of or behind an observer at `pos` facing `heading`.
///
/// A point exactly abeam of the observer counts as ahead.
pub fn relative_bearing(pos: Point2d, heading: f64, other: Point2d) -> Bearing {
    if (other - pos).dot(unit_vector(heading)) >= 0.0 {
        Bearing::Ahead
    } else {
        Bearing::Behind
    }
}

/// The polar angle of `point` around `centre`, in degrees within `[0, 360)`.
pub fn angular_position(centre: Point2d, point: Point2d) -> f64 {
    let delta = point - centre;
    let degrees = delta.y.atan2(delta.x).to_degrees().rem_euclid(360.0);
    // `rem_euclid` rounds tiny negative angles up to exactly 360
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Wraps an angle in radians into `[-PI, PI)`.
pub fn wrap_to_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}
