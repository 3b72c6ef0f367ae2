//! Kinematic state and the simulation session
//!
//! A `Projectile` owns its position and velocity privately. Reads are plain
//! `&self` queries and never register interest; interest is only ever
//! registered explicitly through [`Projectile::subscribe`]. Writes go through
//! [`Projectile::update`], which groups them into a single commit.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::ArenaBounds;
use super::observe::{Changes, Observers, SubscriptionId, Watch};
use super::predict::Prediction;
use crate::consts::*;
use crate::velocity_angle;

/// Position (m, y up from the floor) and velocity (m/s) at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Kinematics {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self { pos, vel }
    }

    /// Velocity magnitude
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Velocity direction, see [`velocity_angle`] for the `x == 0` convention
    #[inline]
    pub fn angle(&self) -> f64 {
        velocity_angle(self.vel)
    }
}

/// Physical properties reserved for drag modelling (not used by the integrator)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileOpts {
    /// kg
    pub mass: f64,
    pub drag_coefficient: f64,
}

impl Default for ProjectileOpts {
    fn default() -> Self {
        Self {
            mass: MASS,
            drag_coefficient: 0.0,
        }
    }
}

/// A point mass with observable kinematic state
#[derive(Debug, Serialize, Deserialize)]
pub struct Projectile {
    state: Kinematics,
    pub opts: Option<ProjectileOpts>,
    /// Coefficient of restitution, nominally in [0, 1]. Not validated.
    pub collision_elasticity: f64,
    #[serde(skip)]
    observers: Observers,
}

impl Projectile {
    /// Lossless (elasticity 1) projectile with no opts
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self {
            state: Kinematics::new(pos, vel),
            opts: None,
            collision_elasticity: 1.0,
            observers: Observers::default(),
        }
    }

    pub fn with_opts(mut self, opts: ProjectileOpts) -> Self {
        self.opts = Some(opts);
        self
    }

    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.collision_elasticity = elasticity;
        self
    }

    /// Snapshot of the current state
    #[inline]
    pub fn kinematics(&self) -> Kinematics {
        self.state
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.state.pos
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.state.vel
    }

    /// Apply any number of writes as one commit
    ///
    /// Subscribers see the state before or after `f`, never in between, and
    /// each runs at most once.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Kinematics) -> R) -> R {
        let before = self.state;
        let out = f(&mut self.state);
        let changes = Changes::between(&before, &self.state);
        self.observers.notify(changes, &self.state);
        out
    }

    pub fn set_position(&mut self, pos: DVec2) {
        self.update(|k| k.pos = pos);
    }

    pub fn set_position_x(&mut self, x: f64) {
        self.update(|k| k.pos.x = x);
    }

    pub fn set_position_y(&mut self, y: f64) {
        self.update(|k| k.pos.y = y);
    }

    pub fn set_velocity(&mut self, vel: DVec2) {
        self.update(|k| k.vel = vel);
    }

    pub fn set_velocity_x(&mut self, x: f64) {
        self.update(|k| k.vel.x = x);
    }

    pub fn set_velocity_y(&mut self, y: f64) {
        self.update(|k| k.vel.y = y);
    }

    /// Run `callback` after every commit that changes the watched quantity
    pub fn subscribe(
        &mut self,
        watch: Watch,
        callback: impl FnMut(&Kinematics) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(watch, Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

/// One simulation run: a single projectile inside a fixed arena
#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub projectile: Projectile,
    pub bounds: ArenaBounds,
    /// Prediction taken at launch, used to size the view
    pub launch_prediction: Prediction,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Session {
    pub fn new(projectile: Projectile, bounds: ArenaBounds) -> Self {
        let launch_prediction = projectile.predicted();
        Self {
            projectile,
            bounds,
            launch_prediction,
            time_ticks: 0,
        }
    }

    /// Default launch from the origin with the given elasticity
    pub fn launch(elasticity: f64) -> Self {
        let projectile =
            Projectile::new(LAUNCH_POSITION, LAUNCH_VELOCITY).with_elasticity(elasticity);
        Self::new(projectile, ArenaBounds::default())
    }

    /// Simulated time elapsed (s) at the given timestep
    pub fn elapsed(&self, dt: f64) -> f64 {
        self.time_ticks as f64 * dt
    }
}
