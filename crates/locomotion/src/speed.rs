//! Touchpad speed model.
//!
//! Any touch on the pad snaps the axis speed straight to its scaled target.
//! Once the pad is released the speed bleeds off by a fixed step per fixed
//! update and snaps to zero inside a small deadzone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::LocomotionConfig;

/// Compute the next speed for one axis.
///
/// `input` is clamped into `[-1, 1]`, so the result never exceeds
/// `max_walk_speed` in magnitude.
pub fn next_speed(config: &LocomotionConfig, current: f32, input: f32) -> f32 {
    if input != 0.0 {
        config.max_walk_speed * input.clamp(-1.0, 1.0)
    } else {
        decelerate(config, current)
    }
}

/// Remove one deceleration step from `speed`, keeping its sign.
///
/// The step never carries the speed through zero, and anything left inside
/// the deadzone becomes exactly zero.
pub fn decelerate(config: &LocomotionConfig, speed: f32) -> f32 {
    let slowed = if speed > 0.0 {
        (speed - config.deceleration).max(0.0)
    } else if speed < 0.0 {
        (speed + config.deceleration).min(0.0)
    } else {
        0.0
    };

    if slowed.abs() < config.speed_deadzone {
        0.0
    } else {
        slowed
    }
}

/// Persistent per-axis walking speeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedState {
    /// Speed along the headset's forward direction.
    pub movement_speed: f32,

    /// Speed along the headset's right direction.
    pub strafe_speed: f32,
}

impl SpeedState {
    /// Advance both axes from the current touchpad axis.
    ///
    /// `axis.y` drives forward motion and `axis.x` drives strafing.
    pub fn update(&mut self, config: &LocomotionConfig, axis: Vec2) {
        self.movement_speed = next_speed(config, self.movement_speed, axis.y);
        self.strafe_speed = next_speed(config, self.strafe_speed, axis.x);
    }

    /// True when neither axis is moving.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.movement_speed == 0.0 && self.strafe_speed == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LocomotionConfig {
        LocomotionConfig::default()
    }

    #[test]
    fn test_touch_snaps_to_scaled_target() {
        let config = config();
        for input in [-1.0, -0.5, -0.01, 0.25, 0.7, 1.0] {
            let speed = next_speed(&config, 0.0, input);
            assert!(
                (speed.abs() - config.max_walk_speed * f32::abs(input)).abs() < 1e-6,
                "input {} gave {}",
                input,
                speed
            );
        }
    }

    #[test]
    fn test_touch_ignores_previous_speed() {
        let config = config();
        assert_eq!(next_speed(&config, -3.0, 0.5), 1.5);
    }

    #[test]
    fn test_input_outside_range_is_clamped() {
        let config = config();
        assert_eq!(next_speed(&config, 0.0, 4.0), config.max_walk_speed);
        assert_eq!(next_speed(&config, 0.0, -4.0), -config.max_walk_speed);
    }

    #[test]
    fn test_release_sequence() {
        let config = config();
        let mut speed = next_speed(&config, 0.0, 1.0);
        let mut seen = vec![speed];
        for _ in 0..4 {
            speed = next_speed(&config, speed, 0.0);
            seen.push(speed);
        }

        let expected = [3.0, 2.9, 2.8, 2.7, 2.6];
        for (got, want) in seen.iter().zip(expected) {
            assert!((got - want).abs() < 1e-4, "got {:?}", seen);
        }
    }

    #[test]
    fn test_release_reaches_zero_without_sign_change() {
        let config = config();
        for start in [3.0_f32, -3.0, 1.234, -0.55, 0.1] {
            let limit = (start.abs() / config.deceleration).ceil() as usize;
            let mut speed = start;
            let mut prev = start.abs();
            for _ in 0..limit {
                speed = next_speed(&config, speed, 0.0);
                assert!(speed.abs() <= prev, "magnitude grew from {}", start);
                assert!(speed == 0.0 || speed.signum() == start.signum());
                prev = speed.abs();
            }
            assert_eq!(speed, 0.0, "start {} did not settle", start);
        }
    }

    #[test]
    fn test_full_stop_within_thirty_steps() {
        let config = config();
        let mut speed = 3.0;
        for _ in 0..30 {
            speed = decelerate(&config, speed);
        }
        assert_eq!(speed, 0.0);
    }

    #[test]
    fn test_deadzone_snaps() {
        let config = config();
        assert_eq!(decelerate(&config, 0.15), 0.0);
        assert_eq!(decelerate(&config, -0.15), 0.0);
        assert_eq!(decelerate(&config, 0.0), 0.0);
    }

    #[test]
    fn test_large_step_does_not_overshoot() {
        let config = LocomotionConfig {
            deceleration: 1.0,
            speed_deadzone: 0.0,
            ..Default::default()
        };
        assert_eq!(decelerate(&config, 0.4), 0.0);
        assert_eq!(decelerate(&config, -0.4), 0.0);
    }

    #[test]
    fn test_speed_state_axes_are_independent() {
        let config = config();
        let mut state = SpeedState::default();
        state.update(&config, Vec2::new(-0.5, 1.0));
        assert_eq!(state.movement_speed, 3.0);
        assert_eq!(state.strafe_speed, -1.5);

        state.update(&config, Vec2::new(0.0, 1.0));
        assert_eq!(state.movement_speed, 3.0);
        assert!((state.strafe_speed + 1.4).abs() < 1e-5);
        assert!(!state.is_stopped());
    }
}
