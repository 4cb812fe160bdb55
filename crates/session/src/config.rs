//! Session configuration and loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use touchwalk_locomotion::config::{at_least, ConfigError};
use touchwalk_locomotion::LocomotionConfig;

use crate::binder::BinderConfig;

/// Errors raised while building a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Everything needed to run one player session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Walking, collider and safe-position tuning.
    pub locomotion: LocomotionConfig,

    /// Controller binding retry timing.
    pub binder: BinderConfig,

    /// Fixed steps per second.
    pub fixed_rate: u32,

    /// Upper bound on fixed steps run for a single frame.
    pub max_fixed_steps_per_frame: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            binder: BinderConfig::default(),
            fixed_rate: 50,
            max_fixed_steps_per_frame: 8,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locomotion.validate()?;
        self.binder.validate()?;
        at_least("fixed_rate", self.fixed_rate as f32, 1.0)?;
        at_least("max_fixed_steps_per_frame", self.max_fixed_steps_per_frame as f32, 1.0)?;
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, SessionError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
