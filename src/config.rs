//! Per-scenario narration settings.

use crate::error::Result;
use crate::math::{DangerCone, Point2d};
use crate::util::Interval;
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// The settings of one scenario instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// The region in front of ego that warrants special attention.
    pub danger_cone: DangerCone,
    /// The roundabout topology.
    pub roundabout: RoundaboutConfig,
    /// The junction box, if the map has one.
    pub junction: Option<JunctionArea>,
    /// How many vehicles the lane narration perceives, ego included.
    pub perception_count: usize,
    /// How many vehicles the junction narration perceives, ego included.
    pub junction_perception_count: usize,
    /// The number of lanes of a merge map's main road before the merge.
    pub main_lanes_count: usize,
    /// The length of the forward paths intersected to find collision points, in m.
    pub collision_lookahead: f64,
}

/// The roundabout topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundaboutConfig {
    /// The centre of the ring.
    pub centre: Point2d,
    /// The radius of the inner lane in m.
    pub radius: f64,
    /// Offsets from `radius` between which a vehicle is on the ring.
    pub ring_band: Interval<f64>,
    /// The `(from, to)` roads that lead into the ring.
    pub entries: Vec<(String, String)>,
    /// The `(from, to)` roads that lead off the ring.
    pub exits: Vec<(String, String)>,
}

/// An axis-aligned junction box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JunctionArea {
    pub x: Interval<f64>,
    pub y: Interval<f64>,
}

/// Where a vehicle is relative to the roundabout's approach roads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Entry,
    Exit,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            danger_cone: DangerCone::default(),
            roundabout: RoundaboutConfig::default(),
            junction: None,
            perception_count: 10,
            junction_perception_count: 6,
            main_lanes_count: 2,
            collision_lookahead: 50.0,
        }
    }
}

impl Default for RoundaboutConfig {
    fn default() -> Self {
        let pairs = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect()
        };
        Self {
            centre: Point2d::new(0.0, 0.0),
            radius: 20.0,
            ring_band: Interval::new(-2.0, 6.0),
            entries: pairs(&[
                ("ser", "ses"),
                ("ner", "nes"),
                ("wer", "wes"),
                ("wxs", "wxr"),
                ("nxs", "nxr"),
            ]),
            exits: pairs(&[("eer", "ees"), ("exr", "wxr"), ("ees", "ee"), ("exs", "exr")]),
        }
    }
}

impl ScenarioConfig {
    /// The default settings for the named environment type.
    pub fn for_env_type(env_type: &str) -> Self {
        let mut config = Self::default();
        if env_type == "intersection-v1" {
            config.junction = Some(JunctionArea {
                x: Interval::new(-20.0, 20.0),
                y: Interval::new(-20.0, 20.0),
            });
        }
        config
    }

    /// Parses settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings as JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl RoundaboutConfig {
    /// Whether a point lies on the ring, either lane.
    pub fn is_on_ring(&self, point: Point2d) -> bool {
        (self.ring_band + self.radius).contains(point.distance(self.centre))
    }

    /// Classifies the road `from -> to` as a ring entry or exit.
    pub fn transition(&self, from: &str, to: &str) -> Option<Transition> {
        let matches = |(f, t): &(String, String)| f == from && t == to;
        if self.entries.iter().any(matches) {
            Some(Transition::Entry)
        } else if self.exits.iter().any(matches) {
            Some(Transition::Exit)
        } else {
            None
        }
    }
}

impl JunctionArea {
    /// Whether a point lies inside the box, edges included.
    pub fn contains(&self, point: Point2d) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }
}
