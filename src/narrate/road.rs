//! Road condition paragraphs, one per scenario mode.

use super::Narrator;
use crate::config::Transition;
use crate::error::{NarrationError, Result};
use crate::math::angular_position;
use crate::road::Lane;
use crate::vehicle::VehicleSnapshot;
use std::borrow::Cow;

/// Names a lane slot counted from the left, for slots between the edges.
fn ordinal(slot: usize) -> Cow<'static, str> {
    let n = slot + 1;
    match n {
        2 => "second".into(),
        3 => "third".into(),
        4 => "fourth".into(),
        _ => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{}{}", n, suffix).into()
        }
    }
}

impl Narrator<'_> {
    /// Ego's position on a multi-lane road.
    pub(crate) fn highway_condition(&self) -> Result<String> {
        let ego = self.env.ego();
        let index = ego.lane_index();
        let lanes = self.env.network().lane_count(&index.from, &index.to);

        let mut description = if lanes == 1 {
            "You are driving on a road with only one lane, you can't change lane. ".to_owned()
        } else if index.slot == 0 {
            format!(
                "You are driving on a road with {} lanes, occupying the leftmost lane. ",
                lanes
            )
        } else if index.slot + 1 == lanes {
            format!(
                "You are driving on a road with {} lanes, occupying the rightmost lane. ",
                lanes
            )
        } else {
            format!(
                "You are driving on a {}-lane highway, occupying the {} lane from the left. ",
                lanes,
                ordinal(index.slot)
            )
        };

        description += &format!(
            "You are located at coordinates `({:.2}, {:.2})`. Your vehicle is moving at {:.2} m/s with an acceleration of {:.2} m/s^2. Your lateral position within the lane is {:.2} m.\n",
            ego.position().x,
            ego.position().y,
            ego.speed(),
            ego.acceleration(),
            self.lane_position(ego)?
        );
        Ok(description)
    }

    /// Ego's position on the main road of a merge map.
    pub(crate) fn merge_condition(&self) -> Result<String> {
        let ego = self.env.ego();
        let index = ego.lane_index();
        let lane = self
            .env
            .network()
            .lane(index)
            .ok_or_else(|| NarrationError::UnknownLane { lane: index.clone() })?;
        let lanes = self.env.network().lane_count(&index.from, &index.to);

        let mut description = format!("You are driving on the main road with {} lanes. ", lanes);
        // Extra lanes beyond the main ones mean the on-ramp has appeared
        if lanes > self.config.main_lanes_count {
            description += if index.slot + 2 == lanes {
                "There is a merge lane to your right. Be cautious of merging vehicles. "
            } else if index.slot + 1 == lanes {
                "You are in the rightmost lane. There is a merge lane to your right. Be prepared to allow vehicles to merge. "
            } else {
                "There is a merge lane on the far right. "
            };
        }

        let (long, lat) = lane.local_coordinates(ego.position());
        description += &format!(
            "You are located at coordinates `({:.2}, {:.2})`. Your vehicle is moving at {:.2} m/s with an acceleration of {:.2} m/s^2. Your longitudinal position within the lane is {:.2} m and lateral position is {:.2} m.\n",
            ego.position().x,
            ego.position().y,
            ego.speed(),
            ego.acceleration(),
            long,
            lat
        );
        Ok(description)
    }

    /// Ego's place on the ring and any entry or exit it is approaching.
    pub(crate) fn roundabout_condition(&self) -> String {
        let ego = self.env.ego();
        let roundabout = &self.config.roundabout;
        let angle = angular_position(roundabout.centre, ego.position());
        let index = self
            .env
            .network()
            .closest_lane_index(ego.position())
            .unwrap_or_else(|| ego.lane_index().clone());

        let mut description = format!(
            "You are driving on a roundabout. Your current position is at {:.2} degrees. You are on the {} lane. ",
            angle,
            if index.slot == 0 { "inner" } else { "outer" }
        );
        match roundabout.transition(&index.from, &index.to) {
            Some(Transition::Entry) => {
                description += "You are approaching the entry of the roundabout. Be prepared to yield to vehicles already in the roundabout. ";
            }
            Some(Transition::Exit) => {
                description += "You are approaching an exit of the roundabout. If this is your intended exit, prepare to leave the roundabout. ";
            }
            None => {}
        }
        description += &format!(
            "Your coordinates are ({:.2}, {:.2}). Your speed is {:.2} m/s and acceleration is {:.2} m/s^2.\n",
            ego.position().x,
            ego.position().y,
            ego.speed(),
            ego.acceleration()
        );
        description
    }

    /// A short status for a racing circuit.
    pub(crate) fn racetrack_condition(&self) -> String {
        let ego = self.env.ego();
        format!(
            "You are driving on a racetrack. Maintain your speed and follow the track.\nYour coordinates are ({:.2}, {:.2}). Your speed is {:.2} m/s and acceleration is {:.2} m/s^2.\n",
            ego.position().x,
            ego.position().y,
            ego.speed(),
            ego.acceleration()
        )
    }

    /// Ego's status inside a junction, where lanes no longer matter.
    pub(crate) fn junction_condition(&self) -> String {
        let ego = self.env.ego();
        format!(
            "You are driving in an intersection, you can't change lane. Your current position is `({:.2}, {:.2})`, speed is {:.2} m/s, and acceleration is {:.2} m/s^2.\n",
            ego.position().x,
            ego.position().y,
            ego.speed(),
            ego.acceleration()
        )
    }

    /// How far a vehicle has travelled along its lane, in m.
    ///
    /// On a circular lane this is the arc length times the travelled
    /// fraction of the arc, which is the longitudinal coordinate itself.
    /// Other geometries have no lane position.
    pub(crate) fn lane_position(&self, vehicle: &VehicleSnapshot) -> Result<f64> {
        let index = vehicle.lane_index();
        let lane = self
            .env
            .network()
            .lane(index)
            .ok_or_else(|| NarrationError::UnknownLane { lane: index.clone() })?;
        match lane {
            Lane::Straight(straight) => Ok(straight.local_coordinates(vehicle.position()).0),
            Lane::Circular(circular) => Ok(circular.local_coordinates(vehicle.position()).0),
            Lane::Sine(_) => Err(NarrationError::UnsupportedGeometry {
                lane: index.clone(),
                kind: lane.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ordinal;
    use crate::config::ScenarioConfig;
    use crate::environment::World;
    use crate::math::Point2d;
    use crate::mode::ScenarioMode;
    use crate::narrate::{DisplayTags, Narrator};
    use crate::road::{CircularLane, Lane, RoadNetwork};
    use crate::vehicle::VehicleState;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn degenerate_arc_has_lane_position() {
        let mut network = RoadNetwork::new();
        let arc = CircularLane::new(Point2d::new(0.0, 0.0), 20.0, 0.5, 0.5, true);
        let lane = network.add_lane("a", "b", Lane::Circular(arc));
        let ego = VehicleState {
            position: Point2d::new(20.0 * 0.5f64.cos(), 20.0 * 0.5f64.sin()),
            heading: 0.0,
            speed: 5.0,
            acceleration: 0.0,
            lane_index: lane,
            route: vec![],
        };
        let world = World::new(network, &ego);
        let config = ScenarioConfig::default();
        let mut tags = DisplayTags::new();
        let narrator = Narrator::new(&world, &config, ScenarioMode::Generic, &mut tags);

        let position = narrator.lane_position(world.vehicle(world.ego_id()).unwrap()).unwrap();
        assert!(position.is_finite());
        assert_approx_eq!(position, 0.0);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "second");
        assert_eq!(ordinal(3), "fourth");
        assert_eq!(ordinal(4), "5th");
        assert_eq!(ordinal(10), "11th");
        assert_eq!(ordinal(20), "21st");
        assert_eq!(ordinal(21), "22nd");
        assert_eq!(ordinal(22), "23rd");
        assert_eq!(ordinal(111), "112th");
    }
}
