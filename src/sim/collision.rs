//! Boundary collision detection and response
//!
//! The arena is an axis-aligned box. A crossing of the floor or ceiling is
//! checked first; a wall crossing is only considered when no vertical crossing
//! happened, so a corner hit resolves as a vertical bounce. Position is never
//! clamped back inside, so a fast object can overshoot a bound for a tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::Projectile;
use crate::consts::{ARENA_CEILING, ARENA_RIGHT};

/// Arena limits (same unit as position)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub floor: f64,
    pub ceiling: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            floor: 0.0,
            ceiling: ARENA_CEILING,
            left: 0.0,
            right: ARENA_RIGHT,
        }
    }
}

impl ArenaBounds {
    /// Which bound `pos` is on or past, if any (vertical takes priority)
    pub fn detect(&self, pos: DVec2) -> Option<Collision> {
        if pos.y <= self.floor || pos.y >= self.ceiling {
            return Some(Collision::Vertical);
        }
        if pos.x <= self.left || pos.x >= self.right {
            return Some(Collision::Horizontal);
        }
        None
    }

    /// Whether `pos` lies strictly inside the arena
    pub fn contains(&self, pos: DVec2) -> bool {
        self.detect(pos).is_none()
    }
}

/// Kind of boundary crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Floor or ceiling
    Vertical,
    /// Left or right wall
    Horizontal,
}

impl Collision {
    /// Reflect `vel` off this bound, scaling both components by `elasticity`
    ///
    /// Only the component normal to the bound changes sign.
    #[inline]
    pub fn reflect(self, vel: DVec2, elasticity: f64) -> DVec2 {
        match self {
            Collision::Vertical => DVec2::new(vel.x, -vel.y) * elasticity,
            Collision::Horizontal => DVec2::new(-vel.x, vel.y) * elasticity,
        }
    }
}

impl Projectile {
    /// Bounce off `bounds` if currently on or past one of them
    ///
    /// The reflection is one commit; returns which bound was hit.
    pub fn resolve_collision(&mut self, bounds: &ArenaBounds) -> Option<Collision> {
        let collision = bounds.detect(self.position())?;
        let elasticity = self.collision_elasticity;
        self.update(|k| k.vel = collision.reflect(k.vel, elasticity));
        Some(collision)
    }
}
