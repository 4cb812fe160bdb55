//! Headset collision recovery.
//!
//! When the headset pushes into world geometry the body is pulled back to
//! the last safe position behind an instant fade to black.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::PlayerBody;
use crate::safe_position::SafeState;

/// RGBA color in linear 0..1 space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeColor(pub [f32; 4]);

impl FadeColor {
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
}

/// Host-owned screen fade overlay.
pub trait ScreenFade {
    /// Fade the view to `color` over `duration` seconds.
    fn fade(&mut self, color: FadeColor, duration: f32);
}

/// Fade requested when masking a recovery teleport.
pub const RECOVERY_FADE: (FadeColor, f32) = (FadeColor::BLACK, 0.0);

/// What a collision did to the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoveryOutcome {
    /// The body was moved back to a safe position.
    Recovered { from: Vec3, to: Vec3 },

    /// No safe position has been captured yet; nothing happened.
    NoSafePosition,
}

/// Respond to a headset collision.
///
/// Without a captured safe position this is a no-op: the body is not moved
/// and no fade is requested.
pub fn recover(safe: &SafeState, body: &mut PlayerBody, fade: &mut dyn ScreenFade) -> RecoveryOutcome {
    let Some(target) = safe.last_good_position else {
        return RecoveryOutcome::NoSafePosition;
    };

    let (color, duration) = RECOVERY_FADE;
    fade.fade(color, duration);

    let from = body.position;
    body.teleport(target);
    log::debug!("headset collision: recovered body {:?} -> {:?}", from, target);

    RecoveryOutcome::Recovered { from, to: target }
}
