//! Fixed timestep simulation tick
//!
//! Advances the projectile by one step of constant-gravity motion, then
//! resolves any boundary crossing the step produced.

use super::collision::Collision;
use super::state::{Projectile, Session};
use crate::consts::G;

impl Projectile {
    /// Integrate one step of `dt` seconds under gravity
    ///
    /// Horizontal velocity is constant. The vertical displacement uses the
    /// exact constant-acceleration term, then gravity is applied to the
    /// vertical velocity. All three writes are one commit.
    pub fn advance(&mut self, dt: f64) {
        self.update(|k| {
            k.pos.x += k.vel.x * dt;
            k.pos.y += k.vel.y * dt - 0.5 * G * dt * dt;
            k.vel.y -= G * dt;
        });
    }
}

/// Advance the session by one fixed timestep
///
/// Collision resolution sees only post-step positions, never the initial one.
pub fn tick(session: &mut Session, dt: f64) -> Option<Collision> {
    session.time_ticks += 1;
    session.projectile.advance(dt);

    let collision = session.projectile.resolve_collision(&session.bounds);
    if let Some(kind) = collision {
        let k = session.projectile.kinematics();
        log::debug!(
            "tick {}: {:?} bounce at ({:.2}, {:.2}), v = ({:.2}, {:.2})",
            session.time_ticks,
            kind,
            k.pos.x,
            k.pos.y,
            k.vel.x,
            k.vel.y
        );
    }
    collision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::collision::ArenaBounds;
    use crate::sim::observe::Watch;
    use glam::DVec2;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_free_fall_from_rest() {
        let mut p = Projectile::new(DVec2::ZERO, DVec2::ZERO);
        p.advance(SIM_DT);
        assert!((p.velocity().y + G * SIM_DT).abs() < 1e-12);
        assert!((p.position().y + 0.5 * G * SIM_DT * SIM_DT).abs() < 1e-12);
        assert_eq!(p.position().x, 0.0);
        assert_eq!(p.velocity().x, 0.0);
    }

    #[test]
    fn test_advance_moves_horizontally_at_constant_speed() {
        let mut p = Projectile::new(DVec2::ZERO, DVec2::new(30.0, 90.0));
        for _ in 0..24 {
            p.advance(SIM_DT);
        }
        assert!((p.position().x - 30.0).abs() < 1e-9);
        assert_eq!(p.velocity().x, 30.0);
        // One second of gravity
        assert!((p.velocity().y - (90.0 - G)).abs() < 1e-9);
    }

    #[test]
    fn test_advance_is_one_commit() {
        let mut p = Projectile::new(DVec2::ZERO, DVec2::new(30.0, 90.0));
        let pos_count = Rc::new(Cell::new(0));
        let any_count = Rc::new(Cell::new(0));
        let (pc, ac) = (pos_count.clone(), any_count.clone());
        p.subscribe(Watch::Position, move |_| pc.set(pc.get() + 1));
        p.subscribe(Watch::Any, move |_| ac.set(ac.get() + 1));

        p.advance(SIM_DT);
        assert_eq!(pos_count.get(), 1);
        assert_eq!(any_count.get(), 1);
    }

    #[test]
    fn test_observer_sees_full_step() {
        let mut p = Projectile::new(DVec2::ZERO, DVec2::new(30.0, 90.0));
        let mut expected = Projectile::new(DVec2::ZERO, DVec2::new(30.0, 90.0));
        expected.advance(SIM_DT);
        let expected = expected.kinematics();

        let ok = Rc::new(Cell::new(false));
        let o = ok.clone();
        p.subscribe(Watch::Position, move |k| o.set(*k == expected));
        p.advance(SIM_DT);
        assert!(ok.get());
    }

    #[test]
    fn test_tick_counts_and_launches_cleanly() {
        let mut session = crate::sim::Session::launch(1.0);
        // Launch point sits on the floor and left wall but is never resolved
        let hit = tick(&mut session, SIM_DT);
        assert_eq!(hit, None);
        assert_eq!(session.time_ticks, 1);
        assert!(session.projectile.position().y > 0.0);
        assert_eq!(session.elapsed(SIM_DT), SIM_DT);
    }

    #[test]
    fn test_tick_bounces_off_floor() {
        let projectile = Projectile::new(DVec2::new(300.0, 0.1), DVec2::new(0.0, -10.0))
            .with_elasticity(0.5);
        let mut session = Session::new(projectile, ArenaBounds::default());
        let hit = tick(&mut session, SIM_DT);
        assert_eq!(hit, Some(Collision::Vertical));

        let vy_after_step = -10.0 - G * SIM_DT;
        assert!((session.projectile.velocity().y - (-0.5 * vy_after_step)).abs() < 1e-12);
    }

    #[test]
    fn test_inelastic_floor_then_gravity_pulls_down() {
        let projectile = Projectile::new(DVec2::new(300.0, 0.0), DVec2::ZERO).with_elasticity(0.0);
        let mut session = Session::new(projectile, ArenaBounds::default());

        assert_eq!(tick(&mut session, SIM_DT), Some(Collision::Vertical));
        assert_eq!(session.projectile.velocity(), DVec2::ZERO);
        let resting = session.projectile.position();

        // Gravity re-accelerates it downward; nothing else moves
        session.projectile.advance(SIM_DT);
        assert!((session.projectile.velocity().y + G * SIM_DT).abs() < 1e-12);
        assert_eq!(session.projectile.velocity().x, 0.0);
        assert_eq!(session.projectile.position().x, resting.x);
        assert!(session.projectile.position().y < resting.y);

        // And the next bounce kills it again
        assert_eq!(
            session.projectile.resolve_collision(&session.bounds),
            Some(Collision::Vertical)
        );
        assert_eq!(session.projectile.velocity(), DVec2::ZERO);
    }

    #[test]
    fn test_lossless_session_conserves_speed_at_bounces() {
        let mut session = crate::sim::Session::launch(1.0);
        let mut bounces = 0;
        for _ in 0..(24 * 60) {
            let before = session.projectile.kinematics();
            // Speed right after the gravity step is what the bounce must preserve
            let mut probe = Projectile::new(before.pos, before.vel);
            probe.advance(SIM_DT);
            let speed = probe.kinematics().speed();

            if tick(&mut session, SIM_DT).is_some() {
                bounces += 1;
                assert!((session.projectile.kinematics().speed() - speed).abs() < 1e-9);
            }
        }
        assert!(bounces > 0);
    }

    #[test]
    fn test_prediction_changes_after_bounce() {
        let mut session = crate::sim::Session::launch(0.5);
        while tick(&mut session, SIM_DT).is_none() {}
        // Post-bounce prediction describes the new arc, not the launch arc
        assert_ne!(session.projectile.predicted(), session.launch_prediction);
    }

    proptest! {
        #[test]
        fn prop_free_fall_from_rest(dt in 1e-4f64..1.0) {
            let mut p = Projectile::new(DVec2::ZERO, DVec2::ZERO);
            p.advance(dt);
            prop_assert!((p.velocity().y + G * dt).abs() < 1e-9);
            prop_assert!((p.position().y + 0.5 * G * dt * dt).abs() < 1e-9);
        }

        #[test]
        fn prop_vertical_bounce_law(
            vx in -100.0f64..100.0,
            vy in -100.0f64..100.0,
            e in 0.0f64..=1.0,
        ) {
            let mut p = Projectile::new(DVec2::new(300.0, -1.0), DVec2::new(vx, vy))
                .with_elasticity(e);
            prop_assert_eq!(p.resolve_collision(&ArenaBounds::default()), Some(Collision::Vertical));
            let v = p.velocity();
            prop_assert!((v.y.abs() - e * vy.abs()).abs() < 1e-9);
            prop_assert!(v.y * vy <= 0.0);
            prop_assert!((v.x - e * vx).abs() < 1e-9);
        }

        #[test]
        fn prop_horizontal_bounce_law(
            vx in -100.0f64..100.0,
            vy in -100.0f64..100.0,
            e in 0.0f64..=1.0,
        ) {
            let mut p = Projectile::new(DVec2::new(700.0, 200.0), DVec2::new(vx, vy))
                .with_elasticity(e);
            prop_assert_eq!(p.resolve_collision(&ArenaBounds::default()), Some(Collision::Horizontal));
            let v = p.velocity();
            prop_assert!((v.x.abs() - e * vx.abs()).abs() < 1e-9);
            prop_assert!(v.x * vx <= 0.0);
            prop_assert!((v.y - e * vy).abs() < 1e-9);
        }

        #[test]
        fn prop_prediction_has_no_side_effects(
            x in -10.0f64..610.0,
            y in -10.0f64..410.0,
            vx in -100.0f64..100.0,
            vy in -100.0f64..100.0,
        ) {
            let p = Projectile::new(DVec2::new(x, y), DVec2::new(vx, vy));
            let before = p.kinematics();
            let first = p.predicted();
            let second = p.predicted();
            prop_assert_eq!(first, second);
            prop_assert_eq!(p.kinematics(), before);
        }
    }
}
