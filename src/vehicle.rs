use crate::math::{relative_bearing, unit_vector, Bearing, Point2d, Vector2d};
use crate::road::LaneIndex;
use crate::VehicleId;
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};

/// The kinematic state of a vehicle, as reported by the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// The world space coordinates of the centre of the vehicle.
    pub position: Point2d,
    /// The heading in radians.
    pub heading: f64,
    /// The speed in m/s.
    pub speed: f64,
    /// The acceleration of the last applied action in m/s^2.
    #[serde(default)]
    pub acceleration: f64,
    /// The lane the vehicle is on.
    pub lane_index: LaneIndex,
    /// The planned route, if the vehicle follows one.
    #[serde(default)]
    pub route: Vec<LaneIndex>,
}

/// A read-only view of a vehicle for a single narration call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    /// The vehicle's ID
    pub(crate) id: VehicleId,
    #[serde(flatten)]
    pub(crate) state: VehicleState,
}

impl VehicleSnapshot {
    pub(crate) fn new(id: VehicleId, state: &VehicleState) -> Self {
        Self {
            id,
            state: state.clone(),
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// The full kinematic state.
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.state.position
    }

    /// The heading in radians.
    pub fn heading(&self) -> f64 {
        self.state.heading
    }

    /// A unit vector in world space aligned with the vehicle's heading.
    pub fn direction(&self) -> Vector2d {
        unit_vector(self.state.heading)
    }

    /// The vehicle's speed in m/s.
    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    /// The vehicle's acceleration in m/s^2.
    pub fn acceleration(&self) -> f64 {
        self.state.acceleration
    }

    /// The lane the vehicle is on.
    pub fn lane_index(&self) -> &LaneIndex {
        &self.state.lane_index
    }

    /// The vehicle's route, if it has one.
    pub fn route(&self) -> Option<&[LaneIndex]> {
        if self.state.route.is_empty() {
            None
        } else {
            Some(&self.state.route)
        }
    }

    /// The Euclidean distance between the centres of two vehicles.
    pub fn distance_to(&self, other: &VehicleSnapshot) -> f64 {
        self.state.position.distance(other.state.position)
    }

    /// Whether `other` is ahead of or behind this vehicle.
    pub fn bearing_of(&self, other: &VehicleSnapshot) -> Bearing {
        relative_bearing(self.state.position, self.state.heading, other.state.position)
    }
}
