//! One player's locomotion session.
//!
//! The session owns the locomotion state and every piece of glue around it:
//! the controller binder and its scheduler, the event queue bound sources
//! write into, the grab ledger, and the fixed-step driver. The host feeds it
//! frame time, headset poses and notifications, and reads the body back out.

use glam::Vec3;
use touchwalk_locomotion::{
    HeadsetPose, LocomotionController, PlayerLocomotionState, RecoveryOutcome, SafeUpdate, ScreenFade,
};

use crate::binder::{BindOutcome, ControllerBinder};
use crate::config::{SessionConfig, SessionError};
use crate::device::{ColliderHandle, DeviceIndex, DeviceNotification};
use crate::driver::FrameDriver;
use crate::events::{ControllerEvent, EventQueue};
use crate::grab::{CollisionFilter, GrabLedger};
use crate::scheduler::{ScheduledTask, Scheduler};
use crate::source::InputSource;

/// Everything the session needs from the host engine.
pub trait Host: ScreenFade + CollisionFilter {}

impl<T: ScreenFade + CollisionFilter> Host for T {}

/// Summary of one [`Session::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Fixed steps run this frame.
    pub fixed_steps: u32,

    /// Controller events handled this frame.
    pub events: usize,

    /// Bind attempts that ran this frame.
    pub bind_attempts: Vec<BindOutcome>,

    /// Safe-position tracker result.
    pub safe: SafeUpdate,
}

/// A running locomotion session for one local player.
pub struct Session<H: Host> {
    config: SessionConfig,
    controller: LocomotionController,
    state: PlayerLocomotionState,
    binder: ControllerBinder,
    scheduler: Scheduler,
    driver: FrameDriver,
    events: EventQueue,
    sources: Vec<Box<dyn InputSource>>,
    grabs: GrabLedger,
    body_collider: ColliderHandle,
    host: H,
}

impl<H: Host> Session<H> {
    /// Create a session with the play area rooted at `spawn`.
    ///
    /// `body_collider` is the host's handle for the body's box collider,
    /// used when toggling collisions with held objects.
    pub fn new(config: SessionConfig, spawn: Vec3, body_collider: ColliderHandle, host: H) -> Result<Self, SessionError> {
        config.validate()?;
        let controller = LocomotionController::new(config.locomotion.clone())?;
        let state = controller.spawn(spawn);
        let binder = ControllerBinder::new(config.binder.clone(), config.locomotion.ignore_grabbed_collisions);
        let driver = FrameDriver::new(config.fixed_rate, config.max_fixed_steps_per_frame);

        Ok(Self {
            config,
            controller,
            state,
            binder,
            scheduler: Scheduler::new(),
            driver,
            events: EventQueue::new(),
            sources: Vec::new(),
            grabs: GrabLedger::new(),
            body_collider,
            host,
        })
    }

    /// Start waiting for controllers.
    pub fn start(&mut self) {
        log::debug!("session started at {:?}", self.state.position());
        self.binder.start(&mut self.scheduler);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &PlayerLocomotionState {
        &self.state
    }

    /// Mutable state, for hosts that move the body vertically (gravity,
    /// platforms) between updates.
    pub fn state_mut(&mut self) -> &mut PlayerLocomotionState {
        &mut self.state
    }

    pub fn binder(&self) -> &ControllerBinder {
        &self.binder
    }

    pub fn grabs(&self) -> &GrabLedger {
        &self.grabs
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Seconds since the session was created.
    pub fn elapsed(&self) -> f64 {
        self.scheduler.now()
    }

    // ========================================================================
    // Input sources and devices
    // ========================================================================

    /// Make a controller-like source enumerable.
    pub fn add_source(&mut self, source: Box<dyn InputSource>) {
        self.sources.push(source);
    }

    /// Remove a source from enumeration. It stays in the bound set, so if
    /// it comes back it is not subscribed a second time.
    pub fn remove_source(&mut self, index: DeviceIndex) -> Option<Box<dyn InputSource>> {
        let pos = self.sources.iter().position(|s| s.index() == index)?;
        Some(self.sources.remove(pos))
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// A tracked device attached or detached.
    pub fn device_notification(&mut self, notification: DeviceNotification) {
        self.binder.on_device_notification(notification, &mut self.scheduler);
    }

    /// Try to bind right now instead of waiting for the scheduled attempt.
    pub fn bind_now(&mut self) -> BindOutcome {
        let sink = self.events.sink();
        self.binder.attempt(&mut self.sources, &sink, &mut self.scheduler)
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Run one host frame.
    ///
    /// Order: due scheduled tasks, queued controller events, as many fixed
    /// steps as the elapsed time allows, then the per-frame update.
    pub fn advance(&mut self, frame_dt: f32, headset: &HeadsetPose) -> FrameReport {
        let mut report = FrameReport::default();

        for task in self.scheduler.advance(frame_dt) {
            match task {
                ScheduledTask::BindControllers => report.bind_attempts.push(self.bind_now()),
            }
        }

        report.events = self.pump_events();

        report.fixed_steps = self.driver.advance(frame_dt);
        for _ in 0..report.fixed_steps {
            self.fixed_step(headset);
        }

        report.safe = self.frame(headset);
        report
    }

    /// Handle every queued controller event. Returns how many were handled.
    pub fn pump_events(&mut self) -> usize {
        let events = self.events.drain();
        for event in &events {
            self.handle_event(*event);
        }
        events.len()
    }

    /// One fixed step of the core controller.
    pub fn fixed_step(&mut self, headset: &HeadsetPose) {
        let dt = self.driver.fixed_dt();
        self.controller.on_fixed_step(&mut self.state, headset, dt);
    }

    /// One per-frame update of the core controller.
    pub fn frame(&mut self, headset: &HeadsetPose) -> SafeUpdate {
        self.controller.on_frame(&mut self.state, headset)
    }

    /// The headset collider reported contact with world geometry.
    pub fn headset_collision(&mut self) -> RecoveryOutcome {
        self.controller.on_headset_collision(&mut self.state, &mut self.host)
    }

    fn handle_event(&mut self, event: ControllerEvent) {
        if !self.binder.is_bound(event.source()) {
            log::debug!("dropping event from unbound {}", event.source());
            return;
        }

        match event {
            ControllerEvent::AxisChanged { axis, .. } => {
                self.controller.on_axis_changed(&mut self.state, axis);
            }
            ControllerEvent::AxisReleased { .. } => {
                self.controller.on_axis_released(&mut self.state);
            }
            ControllerEvent::Grabbed { object, .. } => {
                self.grabs.grab(self.body_collider, object, &mut self.host);
            }
            ControllerEvent::Ungrabbed { object, .. } => {
                self.grabs.ungrab(self.body_collider, object, &mut self.host);
            }
        }
    }
}
