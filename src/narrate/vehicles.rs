//! Surrounding vehicle paragraphs.

use super::{Narrator, NO_VEHICLES_NEAR};
use crate::classify::{lane_relation, Classification, LaneBucket};
use crate::config::Transition;
use crate::error::Result;
use crate::math::{angular_position, Bearing};
use crate::mode::ScenarioMode;
use crate::vehicle::VehicleSnapshot;

impl Narrator<'_> {
    /// Describes the nearest vehicles on ego's lane, its neighbours and its
    /// target lane. Everything else that was perceived is left unsaid.
    pub(crate) fn lane_vehicles(&mut self) -> Result<String> {
        let env = self.env;
        let ego = env.ego();
        let network = env.network();
        let perceived = env.close_vehicles(self.config.perception_count.saturating_sub(1), true);
        if perceived.is_empty() {
            return Ok(NO_VEHICLES_NEAR.to_owned());
        }

        let merge = self.mode == ScenarioMode::Merge;
        let classes =
            Classification::classify(network, ego, &perceived, self.mode.next_lane_rule(), merge)?;
        let current = ego.lane_index();

        let mut lines = String::new();
        for &vehicle in &perceived {
            if !classes.is_valid(vehicle.id()) {
                continue;
            }
            let lane = vehicle.lane_index();
            let relation = match lane_relation(network, current, classes.next_lane(), lane) {
                Some(relation) => relation,
                None => continue,
            };
            let place = match relation {
                LaneBucket::Current => "driving on the same lane as you",
                LaneBucket::Right
                    if merge
                        && current.slot + 1 == self.config.main_lanes_count
                        && lane.slot == self.config.main_lanes_count =>
                {
                    "merging from the right"
                }
                LaneBucket::Right => "driving on the lane to your right",
                LaneBucket::Left => "driving on the lane to your left",
                LaneBucket::Target | LaneBucket::Merge => "driving on your target lane",
            };
            lines += &format!(
                "- Car `{}` is {} and is {}. ",
                self.tags.tag(vehicle.id()),
                place,
                ego.bearing_of(vehicle)
            );
            lines += &self.kinematics(vehicle)?;
        }
        Ok(Self::vehicle_list(lines))
    }

    /// Position, speed and acceleration of a narrated vehicle, plus its lane
    /// position outside junction maps.
    fn kinematics(&self, vehicle: &VehicleSnapshot) -> Result<String> {
        let mut line = format!(
            "The position of it is `({:.2}, {:.2})`, speed is {:.2} m/s, acceleration is {:.2} m/s^2",
            vehicle.position().x,
            vehicle.position().y,
            vehicle.speed(),
            vehicle.acceleration()
        );
        if self.config.junction.is_none() {
            line += &format!(", and lane position is {:.2} m", self.lane_position(vehicle)?);
        }
        line += ".\n";
        Ok(line)
    }

    /// Describes every other vehicle by its place on or near the ring.
    pub(crate) fn roundabout_vehicles(&mut self) -> String {
        let env = self.env;
        let config = self.config;
        let ego = env.ego();
        let roundabout = &config.roundabout;
        let ego_angle = angular_position(roundabout.centre, ego.position());

        let mut description = String::new();
        for vehicle in env.vehicles().filter(|v| v.id() != ego.id()) {
            let tag = self.tags.tag(vehicle.id());
            let index = env
                .network()
                .closest_lane_index(vehicle.position())
                .unwrap_or_else(|| vehicle.lane_index().clone());

            if roundabout.is_on_ring(vehicle.position()) {
                let angle = angular_position(roundabout.centre, vehicle.position());
                // Ahead means within half a turn anticlockwise of ego
                let bearing = if (angle - ego_angle).rem_euclid(360.0) <= 180.0 {
                    Bearing::Ahead
                } else {
                    Bearing::Behind
                };
                description +=
                    &format!("- Vehicle `{}` at {:.2} degrees, {}. ", tag, angle, bearing);
                match roundabout.transition(&index.from, &index.to) {
                    Some(Transition::Entry) => {
                        description += "It is approaching the entry of the roundabout. "
                    }
                    Some(Transition::Exit) => {
                        description += "It is approaching the exit of the roundabout. "
                    }
                    None => {}
                }
            } else {
                description += &format!(
                    "- Vehicle `{}` on {} approaching the roundabout. ",
                    tag, index.from
                );
            }
            description += &format!(
                "Its speed is {:.2} m/s. Its coordinates are ({:.2}, {:.2}).\n",
                vehicle.speed(),
                vehicle.position().x,
                vehicle.position().y
            );
        }

        if description.is_empty() {
            NO_VEHICLES_NEAR.to_owned()
        } else {
            format!("Surrounding vehicles:\n{}", description)
        }
    }
}
