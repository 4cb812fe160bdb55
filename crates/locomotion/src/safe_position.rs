//! Safe-position tracking.
//!
//! Keeps a running estimate of the player's standing headset height on the
//! current floor and remembers the last body position where the headset was
//! close enough to that height. A short crouch keeps the last position; a
//! change of floor height (stairs, platforms) restarts the estimate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::LocomotionConfig;

/// Result of one tracker update, mostly useful for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeUpdate {
    /// The floor moved and the standing height was restarted.
    pub floor_changed: bool,

    /// The current body position was recorded as safe.
    pub captured: bool,
}

/// Rolling safe-position state for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafeState {
    /// Highest headset height seen on the current floor.
    pub highest_headset_y: f32,

    /// Body height seen on the previous update.
    pub last_play_area_y: f32,

    /// Last body position captured while standing.
    pub last_good_position: Option<Vec3>,
}

impl SafeState {
    /// Run one per-frame update.
    pub fn update(&mut self, config: &LocomotionConfig, body_position: Vec3, headset_y: f32) -> SafeUpdate {
        let mut result = SafeUpdate::default();

        if (body_position.y - self.last_play_area_y).abs() > config.floor_variance {
            self.highest_headset_y = 0.0;
            result.floor_changed = true;
        }

        if headset_y > self.highest_headset_y {
            self.highest_headset_y = headset_y;
        }

        if headset_y > self.highest_headset_y - config.crouch_margin {
            if self.last_good_position.is_none() {
                log::debug!("first safe position captured at {:?}", body_position);
            }
            self.last_good_position = Some(body_position);
            result.captured = true;
        }

        self.last_play_area_y = body_position.y;
        result
    }

    /// Whether a safe position has ever been captured.
    ///
    /// Once true this stays true for the rest of the session.
    #[inline]
    pub fn last_good_position_set(&self) -> bool {
        self.last_good_position.is_some()
    }
}
