//! Lane geometries.

use crate::math::{project_local, rot90, unit_vector, wrap_to_pi, Point2d, Vector2d};
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};

/// The default lane width in m.
pub const DEFAULT_WIDTH: f64 = 4.0;

/// The geometry of a single lane.
///
/// Every lane has a local frame: `long` is the arc length along the
/// centre line from the lane's start, `lat` the signed offset from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Lane {
    Straight(StraightLane),
    Circular(CircularLane),
    Sine(SineLane),
}

/// A lane whose centre line is a line segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StraightLane {
    pub start: Point2d,
    pub end: Point2d,
    pub width: f64,
}

/// A lane whose centre line is an arc of a circle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircularLane {
    pub centre: Point2d,
    pub radius: f64,
    /// Angle of the lane's start around `centre`, in radians.
    pub start_phase: f64,
    /// Angle of the lane's end around `centre`, in radians.
    pub end_phase: f64,
    /// Whether the phase increases along the lane.
    pub clockwise: bool,
    pub width: f64,
}

/// A straight lane whose centre line oscillates sideways.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SineLane {
    #[serde(flatten)]
    pub base: StraightLane,
    pub amplitude: f64,
    pub pulsation: f64,
    pub phase: f64,
}

impl Lane {
    /// A short name of the geometry kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Lane::Straight(_) => "straight",
            Lane::Circular(_) => "circular",
            Lane::Sine(_) => "sine",
        }
    }

    /// The length of the lane's centre line in m.
    pub fn length(&self) -> f64 {
        match self {
            Lane::Straight(lane) => lane.length(),
            Lane::Circular(lane) => lane.length(),
            Lane::Sine(lane) => lane.base.length(),
        }
    }

    /// The lane width in m.
    pub fn width(&self) -> f64 {
        match self {
            Lane::Straight(lane) => lane.width,
            Lane::Circular(lane) => lane.width,
            Lane::Sine(lane) => lane.base.width,
        }
    }

    /// Converts lane-local coordinates to a world position.
    pub fn position(&self, long: f64, lat: f64) -> Point2d {
        match self {
            Lane::Straight(lane) => lane.position(long, lat),
            Lane::Circular(lane) => lane.position(long, lat),
            Lane::Sine(lane) => lane.position(long, lat),
        }
    }

    /// Converts a world position to lane-local `(long, lat)` coordinates.
    pub fn local_coordinates(&self, point: Point2d) -> (f64, f64) {
        match self {
            Lane::Straight(lane) => lane.local_coordinates(point),
            Lane::Circular(lane) => lane.local_coordinates(point),
            Lane::Sine(lane) => lane.local_coordinates(point),
        }
    }

    /// A distance-like measure between a point and the lane,
    /// combining the lateral offset with any overshoot past either end.
    pub fn distance(&self, point: Point2d) -> f64 {
        let (long, lat) = self.local_coordinates(point);
        lat.abs() + f64::max(long - self.length(), 0.0) + f64::max(-long, 0.0)
    }
}

impl StraightLane {
    pub fn new(start: Point2d, end: Point2d) -> Self {
        Self {
            start,
            end,
            width: DEFAULT_WIDTH,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// The unit vector along the lane.
    pub fn direction(&self) -> Vector2d {
        (self.end - self.start).normalize()
    }

    pub fn position(&self, long: f64, lat: f64) -> Point2d {
        let dir = self.direction();
        self.start + dir * long + rot90(dir) * lat
    }

    pub fn local_coordinates(&self, point: Point2d) -> (f64, f64) {
        let dir = self.direction();
        let local = project_local(point, self.start, dir, rot90(dir));
        (local.x, local.y)
    }
}

impl CircularLane {
    pub fn new(
        centre: Point2d,
        radius: f64,
        start_phase: f64,
        end_phase: f64,
        clockwise: bool,
    ) -> Self {
        Self {
            centre,
            radius,
            start_phase,
            end_phase,
            clockwise,
            width: DEFAULT_WIDTH,
        }
    }

    fn sign(&self) -> f64 {
        if self.clockwise {
            1.0
        } else {
            -1.0
        }
    }

    pub fn length(&self) -> f64 {
        self.radius * (self.end_phase - self.start_phase) * self.sign()
    }

    pub fn position(&self, long: f64, lat: f64) -> Point2d {
        let phi = self.sign() * long / self.radius + self.start_phase;
        self.centre + unit_vector(phi) * (self.radius - lat * self.sign())
    }

    pub fn local_coordinates(&self, point: Point2d) -> (f64, f64) {
        let delta = point - self.centre;
        let phi = delta.y.atan2(delta.x);
        let phi = self.start_phase + wrap_to_pi(phi - self.start_phase);
        let r = delta.magnitude();
        let long = self.sign() * (phi - self.start_phase) * self.radius;
        let lat = self.sign() * (self.radius - r);
        (long, lat)
    }
}

impl SineLane {
    fn offset(&self, long: f64) -> f64 {
        self.amplitude * (self.pulsation * long + self.phase).sin()
    }

    pub fn position(&self, long: f64, lat: f64) -> Point2d {
        self.base.position(long, lat + self.offset(long))
    }

    pub fn local_coordinates(&self, point: Point2d) -> (f64, f64) {
        let (long, lat) = self.base.local_coordinates(point);
        (long, lat - self.offset(long))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn straight_local_frame() {
        let lane = StraightLane::new(Point2d::new(0.0, 4.0), Point2d::new(100.0, 4.0));
        let lane = Lane::Straight(lane);
        let (long, lat) = lane.local_coordinates(Point2d::new(30.0, 5.5));
        assert_approx_eq!(long, 30.0);
        assert_approx_eq!(lat, 1.5);
        let p = lane.position(30.0, 1.5);
        assert_approx_eq!(p.x, 30.0);
        assert_approx_eq!(p.y, 5.5);
        assert_approx_eq!(lane.distance(Point2d::new(110.0, 4.0)), 10.0);
    }

    #[test]
    fn circular_round_trip() {
        for clockwise in [true, false] {
            let end = if clockwise { PI } else { -PI };
            let lane = CircularLane::new(Point2d::new(0.0, 0.0), 20.0, 0.0, end, clockwise);
            assert_approx_eq!(lane.length(), 20.0 * PI);
            let p = lane.position(15.0, 1.0);
            let (long, lat) = lane.local_coordinates(p);
            assert_approx_eq!(long, 15.0);
            assert_approx_eq!(lat, 1.0);
        }
    }

    #[test]
    fn sine_removes_oscillation() {
        let lane = SineLane {
            base: StraightLane::new(Point2d::new(0.0, 0.0), Point2d::new(100.0, 0.0)),
            amplitude: 2.0,
            pulsation: 0.1,
            phase: 0.0,
        };
        let p = lane.position(20.0, 0.5);
        let (long, lat) = lane.local_coordinates(p);
        assert_approx_eq!(long, 20.0);
        assert_approx_eq!(lat, 0.5);
        assert_eq!(Lane::Sine(lane).kind(), "sine");
    }
}
