//! Touchpad locomotion controller.
//!
//! This is the entry point the host calls into. It owns no per-player data;
//! every call takes the [`PlayerLocomotionState`] to update.

use glam::{Vec2, Vec3};

use crate::body::PlayerBody;
use crate::config::{ConfigError, LocomotionConfig};
use crate::integrator::integrate;
use crate::pose::HeadsetPose;
use crate::recovery::{recover, RecoveryOutcome, ScreenFade};
use crate::safe_position::SafeUpdate;
use crate::state::PlayerLocomotionState;

/// Touchpad locomotion controller.
///
/// The host drives it from two periodic callbacks plus events:
///
/// - [`on_fixed_step`](Self::on_fixed_step): speed model and body integration
/// - [`on_frame`](Self::on_frame): safe-position tracking and collider fitting
/// - [`on_axis_changed`](Self::on_axis_changed) / [`on_axis_released`](Self::on_axis_released)
/// - [`on_headset_collision`](Self::on_headset_collision)
///
/// # Example
///
/// ```ignore
/// let controller = LocomotionController::new(LocomotionConfig::default())?;
/// let mut state = controller.spawn(Vec3::ZERO);
///
/// // Every physics step:
/// controller.on_fixed_step(&mut state, &pose, fixed_dt);
/// // Every rendered frame:
/// controller.on_frame(&mut state, &pose);
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
}

impl LocomotionController {
    /// Create a controller, rejecting unusable configurations.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self {
            config: LocomotionConfig::default(),
        }
    }

    /// Movement configuration.
    #[inline]
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Create the state for a player whose play area starts at `position`.
    pub fn spawn(&self, position: Vec3) -> PlayerLocomotionState {
        PlayerLocomotionState::new(&self.config, position)
    }

    // ========================================================================
    // Input events
    // ========================================================================

    /// A controller reported a new touchpad axis. Non-finite components
    /// read as no touch on that axis.
    pub fn on_axis_changed(&self, state: &mut PlayerLocomotionState, axis: Vec2) {
        let axis = Vec2::new(finite_or_zero(axis.x), finite_or_zero(axis.y));
        state.touch_axis = axis.clamp(Vec2::splat(-1.0), Vec2::ONE);
    }

    /// A controller reported the touchpad was let go.
    pub fn on_axis_released(&self, state: &mut PlayerLocomotionState) {
        state.touch_axis = Vec2::ZERO;
    }

    // ========================================================================
    // Periodic updates
    // ========================================================================

    /// Fixed-rate update: ramp speeds and slide the body across the floor.
    pub fn on_fixed_step(&self, state: &mut PlayerLocomotionState, headset: &HeadsetPose, delta_time: f32) {
        state.speed.update(&self.config, state.touch_axis);
        log::trace!(
            "step {}: movement={:.3} strafe={:.3}",
            state.fixed_steps,
            state.speed.movement_speed,
            state.speed.strafe_speed
        );

        state.body.position = integrate(
            state.body.position,
            headset.horizontal_forward(),
            headset.horizontal_right(),
            &state.speed,
            delta_time,
        );
        state.fixed_steps += 1;
    }

    /// Per-frame update: track the safe position, then refit the collider.
    pub fn on_frame(&self, state: &mut PlayerLocomotionState, headset: &HeadsetPose) -> SafeUpdate {
        let update = state.safe.update(&self.config, state.body.position, headset.position.y);
        if update.floor_changed {
            log::debug!(
                "floor height changed to {:.3}, recalibrating standing height",
                state.body.position.y
            );
        }

        fit_collider(&self.config, &mut state.body, headset);
        state.frames += 1;
        update
    }

    // ========================================================================
    // Collision
    // ========================================================================

    /// The headset hit world geometry.
    pub fn on_headset_collision(&self, state: &mut PlayerLocomotionState, fade: &mut dyn ScreenFade) -> RecoveryOutcome {
        recover(&state.safe, &mut state.body, fade)
    }
}

fn fit_collider(config: &LocomotionConfig, body: &mut PlayerBody, headset: &HeadsetPose) {
    let body_y = body.position.y;
    body.collider.fit_to_headset(config, body_y, headset);
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
