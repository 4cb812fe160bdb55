//! Touchwalk Locomotion
//!
//! Touchpad walking for a single room-scale VR player. The controller turns
//! a handheld touchpad axis and the live headset pose into horizontal body
//! motion, keeps the body collider stretched from floor to head, and pulls
//! the body back to a known-safe spot when the headset clips into geometry.
//!
//! # Update order
//!
//! ```text
//!  axis events ──► touch axis
//!                     │
//!  fixed step:        ▼
//!              speed model ──► integrator ──► body position
//!
//!  frame:      safe-position tracker ──► collider fit
//!
//!  headset collision ──► recovery (reads safe position)
//! ```
//!
//! All state for one player lives in [`PlayerLocomotionState`]; the
//! [`LocomotionController`] is stateless apart from its configuration.

pub mod body;
pub mod config;
pub mod controller;
pub mod integrator;
pub mod pose;
pub mod recovery;
pub mod safe_position;
pub mod speed;
pub mod state;

pub use body::{BodyCollider, PlayerBody};
pub use config::{ConfigError, LocomotionConfig};
pub use controller::LocomotionController;
pub use pose::HeadsetPose;
pub use recovery::{FadeColor, RecoveryOutcome, ScreenFade};
pub use safe_position::{SafeState, SafeUpdate};
pub use speed::SpeedState;
pub use state::PlayerLocomotionState;
