//! Locomotion tuning values.
//!
//! All parameters that shape walking, collider fitting and safe-position
//! capture are grouped here so a host can load them from a file.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when a configuration is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: f32,
        value: f32,
    },
}

/// Configuration for touchpad walking.
///
/// Distances are in meters, speeds in meters/second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // ========================================================================
    // Walking
    // ========================================================================
    /// Speed reached with the touchpad pushed fully to one edge.
    pub max_walk_speed: f32,

    /// Amount removed from a speed each fixed step once the pad is released.
    pub deceleration: f32,

    /// Speeds closer to zero than this snap to exactly zero.
    pub speed_deadzone: f32,

    // ========================================================================
    // Collider
    // ========================================================================
    /// Distance between the headset and the top of the body collider.
    /// Approximates the offset between the eyes and the crown of the head.
    pub headset_y_offset: f32,

    /// Small lift added to the collider center whenever it has height.
    pub collider_center_adjustment: f32,

    /// Collider size before the first frame fits it to the headset.
    pub initial_collider_size: Vec3,

    /// Collider center before the first frame fits it to the headset.
    pub initial_collider_center: Vec3,

    // ========================================================================
    // Safe position
    // ========================================================================
    /// How far the headset may drop below standing height and still count
    /// as a recoverable position.
    pub crouch_margin: f32,

    /// Vertical body movement larger than this is treated as a floor change.
    pub floor_variance: f32,

    // ========================================================================
    // Body
    // ========================================================================
    /// Mass of the player body (kg).
    pub body_mass: f32,

    /// Ignore collisions between the body and any object the player holds.
    pub ignore_grabbed_collisions: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            max_walk_speed: 3.0,
            deceleration: 0.1,
            speed_deadzone: 0.1,

            headset_y_offset: 0.2,
            collider_center_adjustment: 0.009,
            initial_collider_size: Vec3::new(0.25, 1.0, 0.25),
            initial_collider_center: Vec3::new(0.0, 1.0, 0.0),

            crouch_margin: 0.5,
            floor_variance: 0.005,

            body_mass: 100.0,
            ignore_grabbed_collisions: true,
        }
    }
}

impl LocomotionConfig {
    /// Slower walking that eases out over a longer distance.
    /// Suited to players prone to simulator sickness.
    pub fn comfort() -> Self {
        Self {
            max_walk_speed: 1.8,
            deceleration: 0.05,
            ..Default::default()
        }
    }

    /// Faster walking with an almost immediate stop.
    pub fn brisk() -> Self {
        Self {
            max_walk_speed: 4.5,
            deceleration: 0.3,
            ..Default::default()
        }
    }

    /// Check every value for something the controller can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("max_walk_speed", self.max_walk_speed)?;
        positive("deceleration", self.deceleration)?;
        non_negative("speed_deadzone", self.speed_deadzone)?;
        finite("headset_y_offset", self.headset_y_offset)?;
        finite("collider_center_adjustment", self.collider_center_adjustment)?;
        for (field, v) in [
            ("initial_collider_size", self.initial_collider_size),
            ("initial_collider_center", self.initial_collider_center),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NotFinite {
                    field,
                    value: f32::NAN,
                });
            }
        }
        non_negative("crouch_margin", self.crouch_margin)?;
        non_negative("floor_variance", self.floor_variance)?;
        positive("body_mass", self.body_mass)?;
        Ok(())
    }
}

pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Validate that `value` is finite and at least `min`.
pub fn at_least(field: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::BelowMinimum { field, min, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocomotionConfig::default();
        assert_eq!(config.max_walk_speed, 3.0);
        assert_eq!(config.deceleration, 0.1);
        assert_eq!(config.headset_y_offset, 0.2);
        assert_eq!(config.crouch_margin, 0.5);
        assert!(config.ignore_grabbed_collisions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        assert!(LocomotionConfig::comfort().validate().is_ok());
        assert!(LocomotionConfig::brisk().validate().is_ok());
        assert!(LocomotionConfig::comfort().max_walk_speed < LocomotionConfig::brisk().max_walk_speed);
    }

    #[test]
    fn test_zero_deceleration_rejected() {
        let config = LocomotionConfig {
            deceleration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "deceleration",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_nan_rejected() {
        let config = LocomotionConfig {
            headset_y_offset: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "headset_y_offset", .. })
        ));
    }

    #[test]
    fn test_at_least() {
        assert!(at_least("retry_multiplier", 1.2, 1.0).is_ok());
        assert!(at_least("retry_multiplier", 0.9, 1.0).is_err());
    }
}
