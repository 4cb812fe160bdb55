//! Player body and its headset-fitted collider.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::LocomotionConfig;
use crate::pose::HeadsetPose;

/// Box collider attached to the player body, in body-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyCollider {
    pub size: Vec3,
    pub center: Vec3,
}

impl BodyCollider {
    /// Stretch the collider from the body's feet up to just below the headset.
    ///
    /// The vertical size is `(headset.y - headset_y_offset) - body_y` and is
    /// left unclamped, so a headset held below the body origin produces a
    /// negative height. The horizontal center follows the headset's local
    /// offset so the box stays under the head when the player leans.
    pub fn fit_to_headset(&mut self, config: &LocomotionConfig, body_y: f32, headset: &HeadsetPose) {
        let height = (headset.position.y - config.headset_y_offset) - body_y;
        let center_y = if height != 0.0 {
            height / 2.0 + config.collider_center_adjustment
        } else {
            0.0
        };

        self.size.y = height;
        self.center = Vec3::new(headset.local_position.x, center_y, headset.local_position.z);
    }

    /// Height of the collider (may be negative, see [`fit_to_headset`](Self::fit_to_headset)).
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// The simulated body the player walks around with.
///
/// Rotation is locked upright; only position changes during play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// World-space position of the play area floor origin.
    pub position: Vec3,

    pub rotation: Quat,

    pub mass: f32,

    /// Physics must not rotate the body.
    pub rotation_locked: bool,

    pub collider: BodyCollider,
}

impl PlayerBody {
    /// Create a body at `position` with the configured mass and start-up collider.
    pub fn new(config: &LocomotionConfig, position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            mass: config.body_mass,
            rotation_locked: true,
            collider: BodyCollider {
                size: config.initial_collider_size,
                center: config.initial_collider_center,
            },
        }
    }

    /// Move the body instantly, bypassing integration.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
    }
}
