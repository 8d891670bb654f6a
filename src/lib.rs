//! Natural-language narration of driving-simulation scenes.
//!
//! A [Scenario] wraps an [Environment] and, once per decision frame,
//! describes ego's road and the vehicles around it in plain text for a
//! language-model driving policy.

pub use action::Action;
pub use cgmath;
pub use classify::{lane_relation, Classification, LaneBucket, Nearest, NextLaneRule};
pub use config::{JunctionArea, RoundaboutConfig, ScenarioConfig, Transition};
pub use environment::{ActionSet, Environment, World, DEFAULT_PERCEPTION_DISTANCE};
pub use error::{NarrationError, Result};
pub use mode::ScenarioMode;
pub use narrate::{describe_actions, DisplayTags, Narrator};
pub use plot::{JsonScenePlotter, ScenePlotter};
pub use record::{JsonLinesRecorder, PromptRecord, Record, SceneRecorder};
pub use road::{
    CircularLane, Lane, LaneIndex, Road, RoadNetwork, SineLane, StraightLane, DEFAULT_WIDTH,
};
pub use scenario::Scenario;
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};
pub use util::Interval;
pub use vehicle::{VehicleSnapshot, VehicleState};

mod action;
mod classify;
mod config;
mod environment;
mod error;
pub mod math;
mod mode;
mod narrate;
mod plot;
mod record;
mod road;
mod scenario;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of a vehicle in an [Environment].
    pub struct VehicleId;
}
