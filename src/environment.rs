//! The read-only interface to the driving simulation.

use crate::action::Action;
use crate::math::Bearing;
use crate::road::RoadNetwork;
use crate::vehicle::{VehicleSnapshot, VehicleState};
use crate::VehicleId;
use arrayvec::ArrayVec;
use slotmap::SlotMap;

/// The default perception radius in m: five times a 40 m/s top speed.
pub const DEFAULT_PERCEPTION_DISTANCE: f64 = 200.0;

/// The set of actions that may be legal at once.
pub type ActionSet = ArrayVec<Action, 5>;

/// A snapshot of a running simulation, queried but never mutated
/// by the narrator.
pub trait Environment {
    /// The road network.
    fn network(&self) -> &RoadNetwork;

    /// The controlled vehicle.
    fn ego(&self) -> &VehicleSnapshot;

    /// Every vehicle in the simulation, ego included.
    fn vehicles(&self) -> Box<dyn Iterator<Item = &VehicleSnapshot> + '_>;

    /// The actions ego may currently take.
    fn available_actions(&self) -> ActionSet;

    /// The radius within which ego perceives other vehicles, in m.
    fn perception_distance(&self) -> f64 {
        DEFAULT_PERCEPTION_DISTANCE
    }

    /// Finds up to `count` vehicles other than ego within the perception
    /// distance, nearest first. Unless `see_behind` is set, vehicles behind
    /// ego are left out.
    fn close_vehicles(&self, count: usize, see_behind: bool) -> Vec<&VehicleSnapshot> {
        let ego = self.ego();
        let range = self.perception_distance();
        let mut vehicles = self
            .vehicles()
            .filter(|v| v.id() != ego.id())
            .map(|v| (ego.distance_to(v), v))
            .filter(|(dist, _)| *dist < range)
            .filter(|(_, v)| see_behind || ego.bearing_of(v) == Bearing::Ahead)
            .collect::<Vec<_>>();
        vehicles.sort_by(|a, b| a.0.total_cmp(&b.0));
        vehicles.into_iter().take(count).map(|(_, v)| v).collect()
    }
}

/// An in-memory simulation snapshot that a driver loop keeps up to date.
#[derive(Clone, Debug)]
pub struct World {
    /// The road network.
    network: RoadNetwork,
    /// The vehicles, keyed by their simulation ID.
    vehicles: SlotMap<VehicleId, VehicleSnapshot>,
    /// The controlled vehicle.
    ego: VehicleId,
    /// The actions ego may currently take.
    actions: ActionSet,
    /// The perception radius in m.
    perception_distance: f64,
}

impl World {
    /// Creates a world containing only the ego vehicle.
    pub fn new(network: RoadNetwork, ego: &VehicleState) -> Self {
        let mut vehicles = SlotMap::with_key();
        let ego = vehicles.insert_with_key(|id| VehicleSnapshot::new(id, ego));
        Self {
            network,
            vehicles,
            ego,
            actions: Action::ALL.into_iter().collect(),
            perception_distance: DEFAULT_PERCEPTION_DISTANCE,
        }
    }

    /// Adds a vehicle to the world.
    pub fn add_vehicle(&mut self, state: &VehicleState) -> VehicleId {
        self.vehicles.insert_with_key(|id| VehicleSnapshot::new(id, state))
    }

    /// Removes a vehicle from the world. Ego cannot be removed.
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Option<VehicleState> {
        if id == self.ego {
            return None;
        }
        self.vehicles.remove(id).map(|v| v.state)
    }

    /// The ID of the controlled vehicle.
    pub fn ego_id(&self) -> VehicleId {
        self.ego
    }

    /// Hands control to another vehicle. Returns `false` if it does not exist.
    pub fn set_ego(&mut self, id: VehicleId) -> bool {
        let exists = self.vehicles.contains_key(id);
        if exists {
            self.ego = id;
        }
        exists
    }

    /// Gets the state of a vehicle for updating.
    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut VehicleState> {
        self.vehicles.get_mut(id).map(|v| &mut v.state)
    }

    /// Gets a vehicle.
    pub fn vehicle(&self, id: VehicleId) -> Option<&VehicleSnapshot> {
        self.vehicles.get(id)
    }

    /// Sets the actions ego may currently take.
    pub fn set_available_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions = actions.into_iter().take(Action::ALL.len()).collect();
    }

    /// Sets the perception radius in m.
    pub fn set_perception_distance(&mut self, distance: f64) {
        self.perception_distance = distance;
    }
}

impl Environment for World {
    fn network(&self) -> &RoadNetwork {
        &self.network
    }

    fn ego(&self) -> &VehicleSnapshot {
        &self.vehicles[self.ego]
    }

    fn vehicles(&self) -> Box<dyn Iterator<Item = &VehicleSnapshot> + '_> {
        Box::new(self.vehicles.values())
    }

    fn available_actions(&self) -> ActionSet {
        self.actions.clone()
    }

    fn perception_distance(&self) -> f64 {
        self.perception_distance
    }
}
