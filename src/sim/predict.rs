//! Closed-form trajectory prediction
//!
//! Predictions are instantaneous: they start from the *current* height and
//! velocity, not from the launch. A projectile that is already descending has
//! passed the apex reported here, and after a bounce the prediction describes
//! the post-bounce arc.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::Projectile;
use crate::consts::G;

/// Predicted horizontal range (`x`) and apex height (`y`), in metres
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
}

impl From<Prediction> for DVec2 {
    fn from(p: Prediction) -> Self {
        DVec2::new(p.x, p.y)
    }
}

/// Apex height reached from height `y` rising at `vy`: `y + vy² / 2G`
#[inline]
pub fn apex_height(y: f64, vy: f64) -> f64 {
    y + vy * vy / (2.0 * G)
}

/// Range covered at `vx` while rising to and falling from `apex`
///
/// Treats the flight as symmetric about the apex: fall time
/// `t = sqrt(2 * apex / G)`, total flight `2t`. An apex below zero gives zero
/// range rather than NaN.
#[inline]
pub fn symmetric_range(apex: f64, vx: f64) -> f64 {
    let t = (2.0 * apex.max(0.0) / G).sqrt();
    2.0 * t * vx
}

impl Projectile {
    /// Apex height from the current height and vertical velocity
    pub fn predict_vertical(&self) -> f64 {
        let k = self.kinematics();
        apex_height(k.pos.y, k.vel.y)
    }

    /// Horizontal distance covered on a symmetric flight through the apex
    pub fn predict_horizontal(&self) -> f64 {
        symmetric_range(self.predict_vertical(), self.velocity().x)
    }

    pub fn predicted(&self) -> Prediction {
        Prediction {
            x: self.predict_horizontal(),
            y: self.predict_vertical(),
        }
    }
}
