//! Projectile Sim - a point mass bouncing around a box under gravity
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematic state, prediction, integration, collisions)
//! - `view`: Headless mapping from simulated metres to canvas pixels
//! - `platform`: Fixed-step clock and browser timer plumbing
//! - `settings`: Persisted user preferences

pub mod platform;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{SaveThrottle, Settings};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    use glam::DVec2;

    /// Gravitational acceleration (m/s²), acts on the vertical axis only
    pub const G: f64 = 9.81;
    /// Projectile mass (kg)
    pub const MASS: f64 = 1.0;

    /// Fixed simulation timestep (24 Hz)
    pub const SIM_DT: f64 = 1.0 / 24.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (same unit as position)
    pub const ARENA_CEILING: f64 = 400.0;
    pub const ARENA_RIGHT: f64 = 600.0;

    /// Launch defaults
    pub const LAUNCH_POSITION: DVec2 = DVec2::ZERO;
    pub const LAUNCH_VELOCITY: DVec2 = DVec2::new(30.0, 90.0);

    /// Drawn ball radius (px)
    pub const BALL_RADIUS: f64 = 50.0;
    /// Canvas dimensions (px)
    pub const CANVAS_WIDTH: u32 = 1500;
    pub const CANVAS_HEIGHT: u32 = 900;
}

/// Direction of a velocity vector as `atan(y / x)`, in [-π/2, π/2]
///
/// A vertical vector (`x == 0`) maps to ±π/2 by the sign of `y`, and the zero
/// vector maps to 0.
#[inline]
pub fn velocity_angle(vel: DVec2) -> f64 {
    use std::f64::consts::FRAC_PI_2;
    if vel.x == 0.0 {
        if vel.y > 0.0 {
            FRAC_PI_2
        } else if vel.y < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        }
    } else {
        (vel.y / vel.x).atan()
    }
}
