//! Errors raised while narrating a scene.

use crate::road::LaneIndex;
use thiserror::Error;

/// Errors that can occur while describing a scene.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The lane has no projection for a lane position.
    #[error("cannot compute a lane position on {kind} lane {lane}")]
    UnsupportedGeometry { lane: LaneIndex, kind: &'static str },

    /// The lane index does not exist in the road network.
    #[error("lane {lane} is not part of the road network")]
    UnknownLane { lane: LaneIndex },

    /// The vehicle has no route and the next lane cannot be derived otherwise.
    #[error("no route to derive the lane after {lane}")]
    MissingRoute { lane: LaneIndex },

    /// No road continues from the end of the lane.
    #[error("no road continues after {lane}")]
    NoSuccessor { lane: LaneIndex },

    /// The scenario configuration could not be parsed.
    #[error("invalid scenario configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NarrationError {
    /// Whether narration can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingRoute { .. } | Self::NoSuccessor { .. })
    }
}

pub type Result<T, E = NarrationError> = std::result::Result<T, E>;
