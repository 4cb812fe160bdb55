//! Horizontal body integration.
//!
//! The touchpad only ever moves the body across the floor plane. Height is
//! owned by whatever the host uses for gravity and by recovery teleports.

use glam::Vec3;

use crate::speed::SpeedState;

/// Advance `position` by one fixed step along the given directions.
///
/// `forward` and `right` are expected to be flattened unit vectors (see
/// [`HeadsetPose::horizontal_forward`](crate::HeadsetPose::horizontal_forward)).
/// The returned position always keeps the original `y`.
pub fn integrate(position: Vec3, forward: Vec3, right: Vec3, speed: &SpeedState, delta_time: f32) -> Vec3 {
    let movement = forward * speed.movement_speed * delta_time;
    let strafe = right * speed.strafe_speed * delta_time;

    let fixed_y = position.y;
    let moved = position + movement + strafe;
    Vec3::new(moved.x, fixed_y, moved.z)
}
