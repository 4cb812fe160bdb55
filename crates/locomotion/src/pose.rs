//! Headset pose snapshot.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Read-only sample of the head-mounted display, taken by the host each
/// frame or fixed step. The controller never writes to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadsetPose {
    /// World-space position of the headset.
    pub position: Vec3,

    /// Headset position relative to the play area (the player body).
    pub local_position: Vec3,

    /// Direction the headset faces.
    pub forward: Vec3,

    /// Direction to the headset's right.
    pub right: Vec3,
}

impl Default for HeadsetPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            local_position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

impl HeadsetPose {
    /// Build a level pose looking along `yaw` radians (0 = -Z) with the
    /// headset standing at `local_position` inside a play area rooted at
    /// `origin`.
    pub fn from_yaw(origin: Vec3, local_position: Vec3, yaw: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        Self {
            position: origin + local_position,
            local_position,
            forward: Vec3::new(-sin_yaw, 0.0, -cos_yaw),
            right: Vec3::new(cos_yaw, 0.0, -sin_yaw),
        }
    }

    /// Forward direction flattened onto the floor plane.
    ///
    /// Zero when the headset looks straight up or down.
    pub fn horizontal_forward(&self) -> Vec3 {
        flatten(self.forward)
    }

    /// Right direction flattened onto the floor plane.
    pub fn horizontal_right(&self) -> Vec3 {
        flatten(self.right)
    }
}

#[inline]
fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
