use crate::classify::NextLaneRule;
use std::fmt;

/// The narration strategy of a scenario, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenarioMode {
    /// A highway with an on-ramp merging from the right.
    Merge,
    /// A two-lane roundabout.
    Roundabout,
    /// A closed racing circuit.
    Racetrack,
    /// Any other multi-lane road.
    Generic,
}

impl ScenarioMode {
    /// Selects the mode for an environment type such as `"merge-v0"`.
    ///
    /// Matching is case-insensitive and by substring; the first matching
    /// mode in the order merge, roundabout, racetrack wins.
    pub fn from_env_type(env_type: &str) -> Self {
        let env_type = env_type.to_lowercase();
        if env_type.contains("merge-v0") {
            ScenarioMode::Merge
        } else if env_type.contains("roundabout-v0") {
            ScenarioMode::Roundabout
        } else if env_type.contains("racetrack-v0") {
            ScenarioMode::Racetrack
        } else {
            ScenarioMode::Generic
        }
    }

    /// How the lane after ego's current one is found in this mode.
    pub fn next_lane_rule(self) -> NextLaneRule {
        match self {
            ScenarioMode::Racetrack => NextLaneRule::Ring,
            _ => NextLaneRule::Route,
        }
    }
}

impl fmt::Display for ScenarioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioMode::Merge => "merge",
            ScenarioMode::Roundabout => "roundabout",
            ScenarioMode::Racetrack => "racetrack",
            ScenarioMode::Generic => "generic",
        };
        f.write_str(name)
    }
}
