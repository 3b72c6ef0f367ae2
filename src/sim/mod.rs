//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - One writer (the tick), any number of readers between ticks
//! - No rendering or platform dependencies

pub mod collision;
pub mod observe;
pub mod predict;
pub mod state;
pub mod tick;

pub use collision::{ArenaBounds, Collision};
pub use observe::{Changes, SubscriptionId, Watch};
pub use predict::{Prediction, apex_height, symmetric_range};
pub use state::{Kinematics, Projectile, ProjectileOpts, Session};
pub use tick::tick;
