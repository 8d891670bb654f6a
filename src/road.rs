//! The road network as seen by the narrator: directed road segments
//! between named nodes, each carrying one or more parallel lanes.

use crate::math::Point2d;
pub use lane::{CircularLane, Lane, SineLane, StraightLane, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

mod lane;

/// Identifies a lane: the directed road segment `from -> to` and the
/// lane's slot on it, counted from the left starting at 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneIndex {
    pub from: String,
    pub to: String,
    pub slot: usize,
}

impl LaneIndex {
    pub fn new(from: impl Into<String>, to: impl Into<String>, slot: usize) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            slot,
        }
    }

    /// Whether both indices name the same road segment.
    pub fn same_road(&self, other: &LaneIndex) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// The index of another slot on the same road.
    pub fn with_slot(&self, slot: usize) -> LaneIndex {
        LaneIndex {
            slot,
            ..self.clone()
        }
    }
}

impl fmt::Display for LaneIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(\"{}\", \"{}\", {})", self.from, self.to, self.slot)
    }
}

/// A directed road segment and its lanes, ordered left to right.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub from: String,
    pub to: String,
    pub lanes: Vec<Lane>,
}

/// A road network.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    /// The roads, in insertion order.
    roads: Vec<Road>,
}

impl RoadNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a lane to the road `from -> to`, creating the road if needed.
    pub fn add_lane(&mut self, from: &str, to: &str, lane: Lane) -> LaneIndex {
        let road = match self.roads.iter().position(|r| r.from == from && r.to == to) {
            Some(idx) => &mut self.roads[idx],
            None => {
                self.roads.push(Road {
                    from: from.to_owned(),
                    to: to.to_owned(),
                    lanes: vec![],
                });
                let idx = self.roads.len() - 1;
                &mut self.roads[idx]
            }
        };
        road.lanes.push(lane);
        LaneIndex::new(from, to, road.lanes.len() - 1)
    }

    /// Returns an iterator over the roads in the network.
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.iter()
    }

    /// Gets the road `from -> to`.
    pub fn road(&self, from: &str, to: &str) -> Option<&Road> {
        self.roads.iter().find(|r| r.from == from && r.to == to)
    }

    /// Gets the lane with the given index.
    pub fn lane(&self, index: &LaneIndex) -> Option<&Lane> {
        self.road(&index.from, &index.to)?.lanes.get(index.slot)
    }

    /// Returns an iterator over every lane and its index.
    pub fn lanes(&self) -> impl Iterator<Item = (LaneIndex, &Lane)> {
        self.roads.iter().flat_map(|road| {
            road.lanes
                .iter()
                .enumerate()
                .map(move |(slot, lane)| (LaneIndex::new(&road.from, &road.to, slot), lane))
        })
    }

    /// The number of lanes on the road `from -> to`.
    pub fn lane_count(&self, from: &str, to: &str) -> usize {
        self.road(from, to).map_or(0, |road| road.lanes.len())
    }

    /// The lanes parallel to `index`, itself included, ordered left to right.
    pub fn side_lanes(&self, index: &LaneIndex) -> SmallVec<[LaneIndex; 4]> {
        (0..self.lane_count(&index.from, &index.to))
            .map(|slot| index.with_slot(slot))
            .collect()
    }

    /// Whether `other` is one of the lanes parallel to `index`.
    pub fn is_side_lane(&self, index: &LaneIndex, other: &LaneIndex) -> bool {
        index.same_road(other) && other.slot < self.lane_count(&index.from, &index.to)
    }

    /// Finds the lane nearest to a point. The first lane wins ties.
    pub fn closest_lane_index(&self, point: Point2d) -> Option<LaneIndex> {
        self.lanes()
            .map(|(index, lane)| (index, lane.distance(point)))
            .reduce(|best, next| if next.1 < best.1 { next } else { best })
            .map(|(index, _)| index)
    }

    /// Determines the lane a vehicle at `position` enters after `current`.
    ///
    /// The next road is the first step of `route` leaving the end node of
    /// `current`, falling back to the first road leaving that node. The
    /// slot is kept when both roads have equally many lanes, otherwise the
    /// lane of the next road closest to `position` is chosen.
    pub fn next_lane(
        &self,
        current: &LaneIndex,
        route: &[LaneIndex],
        position: Point2d,
    ) -> Option<LaneIndex> {
        let next_road = route
            .iter()
            .filter(|step| step.from == current.to)
            .find_map(|step| self.road(&step.from, &step.to))
            .or_else(|| self.roads.iter().find(|road| road.from == current.to))?;

        let slot = if next_road.lanes.len() == self.lane_count(&current.from, &current.to) {
            current.slot
        } else {
            next_road
                .lanes
                .iter()
                .enumerate()
                .map(|(slot, lane)| (slot, lane.distance(position)))
                .reduce(|best, next| if next.1 < best.1 { next } else { best })?
                .0
        };

        Some(LaneIndex::new(&next_road.from, &next_road.to, slot))
    }
}
