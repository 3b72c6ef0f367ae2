//! Headless view mapping
//!
//! Maps simulated metres onto canvas pixels. The canvas is sized so the
//! predicted launch range and apex fill it, with room for the ball.

use glam::DVec2;

use crate::consts::*;
use crate::sim::Prediction;

/// Maximum number of drawn points kept when the path persists
pub const MAX_TRAIL_POINTS: usize = 4096;

/// Canvas geometry (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Drawn ball radius
    pub radius: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT))
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            radius: BALL_RADIUS,
        }
    }

    /// Pixels per metre on each axis, fitted to `prediction`
    ///
    /// `None` when the prediction is degenerate (zero, negative or non-finite
    /// on either axis), since nothing sensible can be drawn.
    pub fn scale(&self, prediction: Prediction) -> Option<DVec2> {
        let scale = DVec2::new(
            (self.width - 4.0 * self.radius) / prediction.x,
            (self.height - 2.0 * self.radius) / prediction.y,
        );
        (scale.is_finite() && scale.x > 0.0 && scale.y > 0.0).then_some(scale)
    }

    /// Canvas position of the ball centre (y down from the top edge)
    pub fn to_canvas(&self, pos: DVec2, scale: DVec2) -> DVec2 {
        DVec2::new(
            (pos.x + self.radius) * scale.x,
            self.height - pos.y * scale.y - self.radius,
        )
    }
}

/// Positions to draw this frame
#[derive(Debug, Clone, Default)]
pub struct PathTrail {
    pub persist: bool,
    points: Vec<DVec2>,
}

impl PathTrail {
    pub fn new(persist: bool) -> Self {
        Self {
            persist,
            points: Vec::new(),
        }
    }

    /// Record the latest position (oldest first)
    pub fn record(&mut self, pos: DVec2) {
        if !self.persist {
            self.points.clear();
        }
        if self.points.len() == MAX_TRAIL_POINTS {
            self.points.remove(0);
        }
        self.points.push(pos);
    }

    /// Switch persistence; turning it off keeps only the latest point
    pub fn set_persist(&mut self, persist: bool) {
        self.persist = persist;
        if !persist && self.points.len() > 1 {
            let start = self.points.len() - 1;
            self.points.drain(..start);
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Session;

    #[test]
    fn test_scale_fits_launch_prediction() {
        let viewport = Viewport::default();
        let prediction = Prediction { x: 550.0, y: 400.0 };
        let scale = viewport.scale(prediction).unwrap();
        assert!((scale.x - 1300.0 / 550.0).abs() < 1e-12);
        assert!((scale.y - 800.0 / 400.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_degenerate() {
        let viewport = Viewport::default();
        assert!(viewport.scale(Prediction { x: 0.0, y: 0.0 }).is_none());
        assert!(viewport.scale(Prediction { x: -10.0, y: 10.0 }).is_none());
    }

    #[test]
    fn test_to_canvas() {
        let viewport = Viewport::new(1000.0, 500.0);
        let scale = DVec2::new(2.0, 1.0);

        // Floor maps one radius above the bottom edge
        let origin = viewport.to_canvas(DVec2::ZERO, scale);
        assert_eq!(origin, DVec2::new(100.0, 450.0));

        // Higher in the sim is further up the canvas
        let up = viewport.to_canvas(DVec2::new(0.0, 100.0), scale);
        assert!(up.y < origin.y);
    }

    #[test]
    fn test_launch_apex_stays_on_canvas() {
        let session = Session::launch(1.0);
        let viewport = Viewport::default();
        let scale = viewport.scale(session.launch_prediction).unwrap();
        let apex = DVec2::new(0.0, session.launch_prediction.y);
        let px = viewport.to_canvas(apex, scale);
        assert!((px.y - viewport.radius).abs() < 1e-9);
    }

    #[test]
    fn test_trail_without_persist() {
        let mut trail = PathTrail::new(false);
        trail.record(DVec2::new(1.0, 1.0));
        trail.record(DVec2::new(2.0, 2.0));
        assert_eq!(trail.points(), &[DVec2::new(2.0, 2.0)]);
    }

    #[test]
    fn test_trail_with_persist() {
        let mut trail = PathTrail::new(true);
        for i in 0..3 {
            trail.record(DVec2::splat(i as f64));
        }
        assert_eq!(trail.points().len(), 3);

        trail.set_persist(false);
        assert_eq!(trail.points(), &[DVec2::splat(2.0)]);
    }

    #[test]
    fn test_trail_cap() {
        let mut trail = PathTrail::new(true);
        for i in 0..(MAX_TRAIL_POINTS + 10) {
            trail.record(DVec2::splat(i as f64));
        }
        assert_eq!(trail.points().len(), MAX_TRAIL_POINTS);
        assert_eq!(trail.points()[0], DVec2::splat(10.0));
    }
}
