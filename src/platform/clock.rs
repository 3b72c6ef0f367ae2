//! Fixed-step accumulator
//!
//! Converts variable wall-clock frame times into a whole number of fixed
//! simulation ticks, carrying the remainder to the next frame.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame (s) credited to the accumulator; longer stalls are dropped
pub const MAX_FRAME_TIME: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f64,
    accumulator: f64,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Time (s) banked toward the next tick
    #[inline]
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Credit `elapsed` seconds and return how many ticks to run now
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        // Drop the backlog beyond the substep cap
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.dt);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks() {
        let mut clock = FixedStep::new(0.25);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.advance(0.1), 1);
        assert!((clock.pending() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FixedStep::default();
        // 0.1 s at 24 Hz is 2 ticks, not the 24 a full second would give
        assert_eq!(clock.advance(1.0), 2);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FixedStep::new(0.001);
        assert_eq!(clock.advance(0.1), MAX_SUBSTEPS);
        assert!(clock.pending() <= clock.dt());
    }

    #[test]
    fn test_negative_elapsed_ignored() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(-5.0), 0);
        assert_eq!(clock.pending(), 0.0);
    }
}
