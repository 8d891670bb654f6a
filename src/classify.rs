//! Sorting nearby vehicles by their lane relative to ego.

use crate::error::{NarrationError, Result};
use crate::math::Bearing;
use crate::road::{LaneIndex, RoadNetwork};
use crate::vehicle::VehicleSnapshot;
use crate::VehicleId;
use itertools::Itertools;
use log::{debug, warn};
use smallvec::SmallVec;
use std::fmt;

/// A lane relationship between a vehicle and ego.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneBucket {
    /// Ego's own lane.
    Current,
    /// The lane directly left of ego.
    Left,
    /// The lane directly right of ego.
    Right,
    /// The lane ego enters next.
    Target,
    /// The rightmost lane of a merge map, where traffic joins.
    Merge,
}

impl LaneBucket {
    /// Every bucket, in narration order.
    pub const ALL: [LaneBucket; 5] = [
        LaneBucket::Current,
        LaneBucket::Left,
        LaneBucket::Right,
        LaneBucket::Target,
        LaneBucket::Merge,
    ];

    fn idx(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LaneBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LaneBucket::Current => "current lane",
            LaneBucket::Left => "left lane",
            LaneBucket::Right => "right lane",
            LaneBucket::Target => "target lane",
            LaneBucket::Merge => "merge lane",
        };
        f.write_str(label)
    }
}

/// How the lane after ego's current one is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextLaneRule {
    /// Follow ego's route through the road network.
    Route,
    /// Treat the slots of a road as a ring: the next lane is the
    /// following slot on the same road, wrapping to slot 0.
    Ring,
}

impl NextLaneRule {
    /// Resolves the lane after `current` for `ego`.
    pub fn resolve(
        self,
        network: &RoadNetwork,
        current: &LaneIndex,
        ego: &VehicleSnapshot,
    ) -> Result<LaneIndex> {
        match self {
            NextLaneRule::Ring => {
                let count = network.lane_count(&current.from, &current.to);
                if count == 0 {
                    return Err(NarrationError::UnknownLane {
                        lane: current.clone(),
                    });
                }
                Ok(current.with_slot((current.slot + 1) % count))
            }
            NextLaneRule::Route => {
                let route = ego.route().ok_or_else(|| NarrationError::MissingRoute {
                    lane: current.clone(),
                })?;
                network
                    .next_lane(current, route, ego.position())
                    .ok_or_else(|| NarrationError::NoSuccessor {
                        lane: current.clone(),
                    })
            }
        }
    }
}

/// Determines which of the current, left, right or target buckets a lane
/// falls into for ego on `current`. Lanes further than one slot away and
/// lanes on unrelated roads have no bucket.
pub fn lane_relation(
    network: &RoadNetwork,
    current: &LaneIndex,
    next_lane: Option<&LaneIndex>,
    lane: &LaneIndex,
) -> Option<LaneBucket> {
    if network.is_side_lane(current, lane) {
        match lane.slot as i64 - current.slot as i64 {
            0 => Some(LaneBucket::Current),
            1 => Some(LaneBucket::Right),
            -1 => Some(LaneBucket::Left),
            _ => None,
        }
    } else if next_lane == Some(lane) {
        Some(LaneBucket::Target)
    } else {
        None
    }
}

/// The nearest vehicle ahead of and behind ego within one bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct Nearest<'a> {
    pub ahead: Option<&'a VehicleSnapshot>,
    pub behind: Option<&'a VehicleSnapshot>,
}

impl<'a> Nearest<'a> {
    fn of(ego: &VehicleSnapshot, members: &[&'a VehicleSnapshot]) -> Self {
        let closest = |bearing: Bearing| {
            let half = members
                .iter()
                .copied()
                .filter(|v| ego.bearing_of(v) == bearing)
                .collect::<SmallVec<[_; 4]>>();
            half.iter()
                .map(|v| ego.distance_to(v))
                .position_min_by(|a, b| a.total_cmp(b))
                .map(|idx| half[idx])
        };
        Self {
            ahead: closest(Bearing::Ahead),
            behind: closest(Bearing::Behind),
        }
    }

    /// The selected vehicles, ahead first.
    pub fn iter(&self) -> impl Iterator<Item = &'a VehicleSnapshot> {
        self.ahead.into_iter().chain(self.behind)
    }
}

/// Nearby vehicles grouped by lane relationship to ego.
#[derive(Clone, Debug)]
pub struct Classification<'a> {
    /// The members of each bucket, in perception order.
    buckets: [SmallVec<[&'a VehicleSnapshot; 4]>; 5],
    /// The nearest members of each bucket.
    nearest: [Nearest<'a>; 5],
    /// The lane ego enters next, if it could be resolved.
    next_lane: Option<LaneIndex>,
}

impl<'a> Classification<'a> {
    /// Classifies `vehicles` around ego.
    ///
    /// Each vehicle joins at most one of the current, left, right and target
    /// buckets. With `merge` set, vehicles on the rightmost slot of ego's road
    /// are additionally tagged into the merge bucket.
    ///
    /// A next lane that cannot be resolved because of a missing route or a
    /// dead end leaves the target bucket empty.
    pub fn classify(
        network: &RoadNetwork,
        ego: &VehicleSnapshot,
        vehicles: &[&'a VehicleSnapshot],
        rule: NextLaneRule,
        merge: bool,
    ) -> Result<Self> {
        let current = ego.lane_index();
        let next_lane = match rule.resolve(network, current, ego) {
            Ok(lane) => Some(lane),
            Err(err) if err.is_recoverable() => {
                warn!("No target lane: {}", err);
                None
            }
            Err(err) => return Err(err),
        };
        let rightmost = network
            .lane_count(&current.from, &current.to)
            .checked_sub(1)
            .map(|slot| current.with_slot(slot));

        let mut buckets: [SmallVec<[&'a VehicleSnapshot; 4]>; 5] = Default::default();
        for &vehicle in vehicles {
            let lane = vehicle.lane_index();
            if let Some(bucket) = lane_relation(network, current, next_lane.as_ref(), lane) {
                buckets[bucket.idx()].push(vehicle);
            }
            if merge && rightmost.as_ref() == Some(lane) {
                buckets[LaneBucket::Merge.idx()].push(vehicle);
            }
        }

        let nearest = LaneBucket::ALL.map(|bucket| Nearest::of(ego, &buckets[bucket.idx()]));

        debug!(
            "Classified {} vehicles: {}",
            vehicles.len(),
            LaneBucket::ALL
                .iter()
                .map(|b| format!("{}={}", b, buckets[b.idx()].len()))
                .join(", ")
        );

        Ok(Self {
            buckets,
            nearest,
            next_lane,
        })
    }

    /// The vehicles in a bucket, in perception order.
    pub fn members(&self, bucket: LaneBucket) -> &[&'a VehicleSnapshot] {
        &self.buckets[bucket.idx()]
    }

    /// Whether any vehicle occupies a bucket.
    pub fn exists(&self, bucket: LaneBucket) -> bool {
        !self.buckets[bucket.idx()].is_empty()
    }

    /// The nearest vehicles ahead and behind in a bucket.
    pub fn nearest(&self, bucket: LaneBucket) -> Nearest<'a> {
        self.nearest[bucket.idx()]
    }

    /// The vehicles worth narrating, bucket by bucket, ahead before behind.
    /// A vehicle nearest in two buckets appears twice.
    pub fn valid_vehicles(&self) -> impl Iterator<Item = &'a VehicleSnapshot> + '_ {
        self.nearest.iter().flat_map(|n| n.iter())
    }

    /// Whether a vehicle is among the valid vehicles.
    pub fn is_valid(&self, id: VehicleId) -> bool {
        self.valid_vehicles().any(|v| v.id() == id)
    }

    /// The lane ego enters next, if it could be resolved.
    pub fn next_lane(&self) -> Option<&LaneIndex> {
        self.next_lane.as_ref()
    }
}
