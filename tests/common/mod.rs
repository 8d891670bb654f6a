//! Scene builders shared by the scenario tests.

#![allow(dead_code)]

use traffic_narrator::math::Point2d;
use traffic_narrator::{Lane, LaneIndex, RoadNetwork, StraightLane, VehicleState};

/// A straight road `from -> to` running east from `x0` to `x1`, with
/// `lanes` lanes 4 m apart starting at y = 0.
pub fn straight_road(
    network: &mut RoadNetwork,
    from: &str,
    to: &str,
    x0: f64,
    x1: f64,
    lanes: usize,
) {
    for slot in 0..lanes {
        let y = 4.0 * slot as f64;
        network.add_lane(
            from,
            to,
            Lane::Straight(StraightLane::new(Point2d::new(x0, y), Point2d::new(x1, y))),
        );
    }
}

/// A vehicle at `(x, y)` with the given heading and speed and no acceleration.
pub fn vehicle(x: f64, y: f64, heading: f64, speed: f64, lane: LaneIndex) -> VehicleState {
    VehicleState {
        position: Point2d::new(x, y),
        heading,
        speed,
        acceleration: 0.0,
        lane_index: lane,
        route: vec![],
    }
}
