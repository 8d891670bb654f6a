use serde::{Deserialize, Serialize};

/// A discrete meta-action of the controlled vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    LaneLeft,
    Idle,
    LaneRight,
    Faster,
    Slower,
}

impl Action {
    /// Every action, ordered by ID.
    pub const ALL: [Action; 5] = [
        Action::LaneLeft,
        Action::Idle,
        Action::LaneRight,
        Action::Faster,
        Action::Slower,
    ];

    /// The numeric action ID understood by the simulation.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Looks up an action by its numeric ID.
    pub fn from_id(id: u8) -> Option<Action> {
        Self::ALL.get(id as usize).copied()
    }

    /// A one-line description for the driving policy.
    pub fn description(self) -> &'static str {
        match self {
            Action::LaneLeft => "Turn-left - change lane to the left of the current lane",
            Action::Idle => "REMAIN - remain in the current lane with current speed",
            Action::LaneRight => "Turn-right - change lane to the right of the current lane",
            Action::Faster => "Acceleration - accelerate the car",
            Action::Slower => "Deceleration - decelerate the car",
        }
    }
}
