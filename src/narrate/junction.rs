//! Surrounding vehicles while ego crosses a junction.

use super::{Narrator, NO_VEHICLES_NEAR};
use crate::error::Result;
use crate::math::{LineSegment2d, Point2d};
use crate::vehicle::VehicleSnapshot;
use log::{info, warn};

impl Narrator<'_> {
    /// Describes vehicles sharing the junction or ego's target lane, with
    /// the point where their paths cross ego's. Vehicles in the danger cone
    /// are flagged on a line of their own.
    pub(crate) fn junction_vehicles(&mut self) -> Result<String> {
        let env = self.env;
        let config = self.config;
        let ego = env.ego();
        let count = config.junction_perception_count.saturating_sub(1);
        let perceived = env.close_vehicles(count, true);
        if perceived.is_empty() {
            return Ok(NO_VEHICLES_NEAR.to_owned());
        }

        let rule = self.mode.next_lane_rule();
        let next_lane = match rule.resolve(env.network(), ego.lane_index(), ego) {
            Ok(lane) => Some(lane),
            Err(err) if err.is_recoverable() => {
                warn!("No target lane in junction: {}", err);
                None
            }
            Err(err) => return Err(err),
        };

        let mut lines = String::new();
        for vehicle in perceived {
            let state = format!(
                "and is {}. The position of it is `({:.2}, {:.2})`, speed is {:.2} m/s, and acceleration is {:.2} m/s^2.",
                ego.bearing_of(vehicle),
                vehicle.position().x,
                vehicle.position().y,
                vehicle.speed(),
                vehicle.acceleration()
            );

            let place = if self.in_junction(vehicle) {
                Some("is also in the junction")
            } else if next_lane.as_ref() == Some(vehicle.lane_index()) {
                Some("is driving on your target lane")
            } else {
                None
            };
            let in_cone = config
                .danger_cone
                .contains(ego.position(), ego.heading(), vehicle.position());
            if place.is_none() && !in_cone {
                continue;
            }

            let tag = self.tags.tag(vehicle.id());
            if let Some(place) = place {
                lines += &format!("- Car `{}` {} {} ", tag, place, state);
                lines += &match self.collision_point(vehicle) {
                    Some(point) => format!(
                        "The potential collision point is `({:.2}, {:.2})`.\n",
                        point.x, point.y
                    ),
                    None => "You two are no potential collision.\n".to_owned(),
                };
            }

            if in_cone {
                info!("Vehicle {} is in the danger cone", tag);
                lines += &format!(
                    "- Car `{}` is close to you {} This car is within your field of vision, and you need to pay attention to its status when making decisions.\n",
                    tag, state
                );
            }
        }
        Ok(Self::vehicle_list(lines))
    }

    /// Where the forward paths of ego and `vehicle` cross within the
    /// configured lookahead.
    pub(crate) fn collision_point(&self, vehicle: &VehicleSnapshot) -> Option<Point2d> {
        let ego = self.env.ego();
        let length = self.config.collision_lookahead;
        let ego_path = LineSegment2d::from_ray(ego.position(), ego.direction(), length);
        let other_path = LineSegment2d::from_ray(vehicle.position(), vehicle.direction(), length);
        ego_path.intersect(&other_path)
    }
}
