//! Vertical bird physics
//!
//! Per tick: gravity, terminal-velocity cap, integrate, soft ceiling.

use super::state::Bird;
use crate::consts::{GRAVITY, JUMP_IMPULSE, TERMINAL_VELOCITY};

/// Advance the bird by one tick
pub fn integrate(bird: &mut Bird) {
    bird.vel = (bird.vel + GRAVITY).min(TERMINAL_VELOCITY);
    bird.y += bird.vel;
    clamp_to_ceiling(bird);
}

/// Soft ceiling: no bounce, no loss
fn clamp_to_ceiling(bird: &mut Bird) {
    if bird.y < 0.0 {
        bird.y = 0.0;
        bird.vel = 0.0;
    }
}

/// Flap: velocity is replaced, not added to
#[inline]
pub fn flap(bird: &mut Bird) {
    bird.vel = JUMP_IMPULSE;
}

/// Passive fall after a crash, stops at the ground
///
/// A bird that crashed while rising still coasts up, but never past the
/// ceiling.
pub fn fall(bird: &mut Bird) {
    let ground = crate::ground_limit();
    if bird.y < ground {
        bird.vel = (bird.vel + GRAVITY).min(TERMINAL_VELOCITY);
        bird.y = (bird.y + bird.vel).min(ground);
        clamp_to_ceiling(bird);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gravity_pulls_down() {
        let mut bird = Bird { y: 200.0, vel: 0.0 };
        integrate(&mut bird);
        assert_eq!(bird.vel, GRAVITY);
        assert_eq!(bird.y, 200.0 + GRAVITY);
    }

    #[test]
    fn test_velocity_capped() {
        let mut bird = Bird {
            y: 200.0,
            vel: 100.0,
        };
        integrate(&mut bird);
        assert_eq!(bird.vel, TERMINAL_VELOCITY);
        assert_eq!(bird.y, 200.0 + TERMINAL_VELOCITY);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut bird = Bird { y: 3.0, vel: -8.0 };
        integrate(&mut bird);
        assert_eq!(bird.y, 0.0);
        assert_eq!(bird.vel, 0.0);
    }

    #[test]
    fn test_flap_overrides() {
        let mut bird = Bird { y: 200.0, vel: 9.0 };
        flap(&mut bird);
        assert_eq!(bird.vel, JUMP_IMPULSE);
        flap(&mut bird);
        assert_eq!(bird.vel, JUMP_IMPULSE);
    }

    #[test]
    fn test_fall_stops_at_ground() {
        let ground = crate::ground_limit();
        let mut bird = Bird {
            y: ground - 1.0,
            vel: 5.0,
        };
        fall(&mut bird);
        assert_eq!(bird.y, ground);
        let vel = bird.vel;
        fall(&mut bird);
        assert_eq!(bird.y, ground);
        assert_eq!(bird.vel, vel);
    }

    #[test]
    fn test_fall_respects_ceiling() {
        let mut bird = Bird { y: 2.0, vel: -7.0 };
        fall(&mut bird);
        assert_eq!(bird.y, 0.0);
        assert_eq!(bird.vel, 0.0);
        fall(&mut bird);
        assert_eq!(bird.y, GRAVITY);
    }

    proptest! {
        #[test]
        fn prop_integrate_matches_formula(y in 0.0f32..500.0, vel in -20.0f32..20.0) {
            let mut bird = Bird { y, vel };
            integrate(&mut bird);
            let expected_vel = (vel + GRAVITY).min(TERMINAL_VELOCITY);
            let expected_y = y + expected_vel;
            if expected_y < 0.0 {
                prop_assert_eq!(bird.y, 0.0);
                prop_assert_eq!(bird.vel, 0.0);
            } else {
                prop_assert_eq!(bird.vel, expected_vel);
                prop_assert_eq!(bird.y, expected_y);
            }
        }
    }
}
