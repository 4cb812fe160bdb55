//! Touchwalk Session
//!
//! Host-facing glue around the locomotion core:
//!
//! - Controller binding with unbounded retry backoff
//! - Event delivery from bound controllers
//! - Deferred task scheduling on a virtual clock
//! - Fixed-timestep driving from variable frame time
//! - Collision filtering for held objects
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Session                             │
//! │  ┌──────────┐  sinks  ┌────────────┐     ┌────────────────┐  │
//! │  │ Binder   │────────►│ InputSource│────►│ EventQueue     │  │
//! │  │ (retry)  │         └────────────┘     └───────┬────────┘  │
//! │  └────▲─────┘                                    ▼           │
//! │       │           ┌──────────────┐     ┌────────────────┐    │
//! │  ┌────┴─────┐     │ FrameDriver  │────►│ Locomotion     │    │
//! │  │Scheduler │     │ (fixed step) │     │ Controller     │    │
//! │  └──────────┘     └──────────────┘     └────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the host's thread. Sources only queue events; the
//! session handles them between updates so nothing mutates state
//! re-entrantly.

pub mod binder;
pub mod config;
pub mod device;
pub mod driver;
pub mod events;
pub mod grab;
pub mod scheduler;
pub mod session;
pub mod source;

pub use binder::{BindOutcome, BindState, BinderConfig, ControllerBinder};
pub use config::{SessionConfig, SessionError};
pub use device::{ColliderHandle, DeviceIndex, DeviceNotification};
pub use driver::FrameDriver;
pub use events::{ControllerEvent, EventQueue, EventSink};
pub use grab::{CollisionFilter, GrabLedger};
pub use scheduler::{ScheduledTask, Scheduler, TaskHandle};
pub use session::{FrameReport, Host, Session};
pub use source::{Grabber, InputSource};

// Re-export core types for convenience
pub use touchwalk_locomotion::{
    FadeColor, HeadsetPose, LocomotionConfig, LocomotionController, PlayerLocomotionState, RecoveryOutcome,
    ScreenFade,
};
