//! Rendering a scene as text for the driving policy.

use crate::config::ScenarioConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::mode::ScenarioMode;
use crate::vehicle::VehicleSnapshot;
pub use actions::describe_actions;
pub use tags::DisplayTags;

mod actions;
mod junction;
mod road;
mod tags;
mod vehicles;

/// Shown when perception finds no vehicles at all.
const NO_VEHICLES_NEAR: &str =
    "There are no other vehicles driving near you, so you can drive completely according to your own ideas.\n";

/// Shown when vehicles are perceived but none is worth mentioning.
const NO_RELEVANT_VEHICLES: &str =
    "No other vehicles driving near you, so you can drive completely according to your own ideas.\n";

/// Introduces the list of mentioned vehicles.
const VEHICLES_PREFIX: &str =
    "Other vehicles are driving around you, and below is their basic information:\n";

/// Describes one decision frame of a scenario.
///
/// A narrator only borrows the environment; it never changes simulation state.
pub struct Narrator<'a> {
    env: &'a dyn Environment,
    config: &'a ScenarioConfig,
    mode: ScenarioMode,
    tags: &'a mut DisplayTags,
}

impl<'a> Narrator<'a> {
    pub fn new(
        env: &'a dyn Environment,
        config: &'a ScenarioConfig,
        mode: ScenarioMode,
        tags: &'a mut DisplayTags,
    ) -> Self {
        Self {
            env,
            config,
            mode,
            tags,
        }
    }

    /// Describes the road condition followed by the surrounding vehicles.
    pub fn describe(&mut self) -> Result<String> {
        let ego = self.env.ego();
        let (road, vehicles) = match self.mode {
            ScenarioMode::Merge => (self.merge_condition()?, self.lane_vehicles()?),
            ScenarioMode::Roundabout => (self.roundabout_condition(), self.roundabout_vehicles()),
            ScenarioMode::Racetrack => (self.racetrack_condition(), self.lane_vehicles()?),
            ScenarioMode::Generic if self.in_junction(ego) => {
                (self.junction_condition(), self.junction_vehicles()?)
            }
            ScenarioMode::Generic => (self.highway_condition()?, self.lane_vehicles()?),
        };
        Ok(road + &vehicles)
    }

    /// Whether a vehicle is inside the configured junction box.
    fn in_junction(&self, vehicle: &VehicleSnapshot) -> bool {
        self.config
            .junction
            .map_or(false, |junction| junction.contains(vehicle.position()))
    }

    /// Wraps per-vehicle lines in the shared header, or explains their absence.
    fn vehicle_list(lines: String) -> String {
        if lines.is_empty() {
            NO_RELEVANT_VEHICLES.to_owned()
        } else {
            format!("{}{}", VEHICLES_PREFIX, lines)
        }
    }
}
