use super::{unit_vector, Point2d};
use cgmath::prelude::*;
use serde::{Deserialize, Serialize};

/// A circular cap of the danger zone, given by the lateral and
/// longitudinal extent of its boundary corner relative to ego.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConeCap {
    /// Lateral half-width at the corner, in m.
    pub lateral: f64,
    /// Longitudinal reach at the corner, in m.
    pub longitudinal: f64,
}

impl ConeCap {
    /// Half-angle of the cap, in radians.
    pub fn angle(&self) -> f64 {
        (self.lateral / self.longitudinal).atan()
    }

    /// Radius of the cap, in m.
    pub fn radius(&self) -> f64 {
        self.lateral.hypot(self.longitudinal)
    }
}

/// The forward-biased region in which other vehicles need ego's attention.
///
/// Approximates an ellipse ahead of ego with two nested caps: a narrow
/// long-range one and a wide short-range one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DangerCone {
    pub narrow: ConeCap,
    pub wide: ConeCap,
}

impl Default for DangerCone {
    fn default() -> Self {
        Self {
            narrow: ConeCap {
                lateral: 3.0,
                longitudinal: 17.5,
            },
            wide: ConeCap {
                lateral: 2.0,
                longitudinal: 2.5,
            },
        }
    }
}

impl DangerCone {
    /// Determines whether `other` lies inside the cone of an observer
    /// at `pos` facing `heading`. A coincident point is always inside.
    pub fn contains(&self, pos: Point2d, heading: f64, other: Point2d) -> bool {
        let relative = other - pos;
        let distance = relative.magnitude();
        if distance <= f64::EPSILON {
            return true;
        }
        let cos = unit_vector(heading).dot(relative / distance);
        let alpha = cos.clamp(-1.0, 1.0).acos();

        if alpha <= self.narrow.angle() {
            distance <= self.narrow.radius()
        } else if alpha <= self.wide.angle() {
            distance <= self.wide.radius()
        } else {
            false
        }
    }
}
