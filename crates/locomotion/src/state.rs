//! Per-player locomotion state.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::body::PlayerBody;
use crate::config::LocomotionConfig;
use crate::safe_position::SafeState;
use crate::speed::SpeedState;

/// Everything the controller mutates for one player.
///
/// Owned by the host and passed by reference into each controller entry
/// point; nothing is kept in globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerLocomotionState {
    pub body: PlayerBody,

    /// Latest touchpad axis: `x` strafes, `y` walks forward. Each in `[-1, 1]`.
    pub touch_axis: Vec2,

    pub speed: SpeedState,

    pub safe: SafeState,

    /// Fixed steps run so far.
    pub fixed_steps: u64,

    /// Frames run so far.
    pub frames: u64,
}

impl PlayerLocomotionState {
    /// Create a state with the body standing at `position`.
    pub fn new(config: &LocomotionConfig, position: Vec3) -> Self {
        Self {
            body: PlayerBody::new(config, position),
            touch_axis: Vec2::ZERO,
            speed: SpeedState::default(),
            safe: SafeState {
                last_play_area_y: position.y,
                ..Default::default()
            },
            fixed_steps: 0,
            frames: 0,
        }
    }

    /// Current body position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Whether the touchpad is currently being touched.
    #[inline]
    pub fn has_touch_input(&self) -> bool {
        self.touch_axis != Vec2::ZERO
    }
}
