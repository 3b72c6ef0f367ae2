//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame time to fixed simulation ticks
//! - The periodic timer that drives the simulation in the browser

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod timer;

pub use clock::FixedStep;
