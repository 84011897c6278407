//! Jump arc geometry and landing classification
//!
//! The marker flies along a semicircle in projected space:
//! - the diameter spans the projected start and end of the jump
//! - the base sits at the platform height
//!
//! Only the coordinate along the jump axis varies, and it is projected as a
//! pseudo-longitude (`lat = 0`) whichever axis it is.

use serde::{Deserialize, Serialize};

use crate::lonlat_to_web_mercator;

/// Project a jump-axis coordinate into planar meters
#[inline]
pub fn project_axis(value: f64) -> f64 {
    lonlat_to_web_mercator(value, 0.0).x
}

/// Semicircular flight arc in projected space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpArc {
    /// Half the projected travel distance
    pub radius: f64,
    /// Projected midpoint of the travel
    pub center: f64,
    /// Height at both ends of the arc
    pub base_height: f64,
}

impl JumpArc {
    /// Arc from `start` to `end` along the jump axis (degrees)
    pub fn new(start: f64, end: f64, base_height: f64) -> Self {
        let x = project_axis(start);
        let tx = project_axis(end);
        let radius = (tx - x).abs() / 2.0;
        Self {
            radius,
            center: x + radius,
            base_height,
        }
    }

    /// Height above the base at a projected position
    ///
    /// Positions outside the diameter sit at the base height.
    pub fn height_at_projected(&self, projected: f64) -> f64 {
        let offset = projected - self.center;
        (self.radius * self.radius - offset * offset).max(0.0).sqrt() + self.base_height
    }

    /// Height at a jump-axis coordinate (degrees)
    pub fn height_at(&self, value: f64) -> f64 {
        self.height_at_projected(project_axis(value))
    }

    /// Peak height, reached at the center
    pub fn apex(&self) -> f64 {
        self.radius + self.base_height
    }
}

/// Result of a completed flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Landing {
    /// Landed on the target; `end` is where the marker actually came down
    Hit { end: f64 },
    /// Under- or over-shot the target
    Miss { end: f64, true_end: f64 },
}

impl Landing {
    pub fn is_hit(&self) -> bool {
        matches!(self, Landing::Hit { .. })
    }
}

/// Decide hit or miss: strictly inside the half-width is a hit
pub fn classify_landing(true_end: f64, end: f64, width_half: f64) -> Landing {
    if (true_end - end).abs() < width_half {
        Landing::Hit { end }
    } else {
        Landing::Miss { end, true_end }
    }
}
