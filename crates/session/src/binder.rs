//! Controller event binding.
//!
//! Controllers show up some time after the session starts and their input
//! components may appear later still. The binder waits until the number of
//! enumerable input sources matches the number of controllers the host
//! reported as connected, then subscribes every source it has not seen yet.
//!
//! While the counts disagree it retries with a backoff that grows without
//! bound, so arbitrarily slow device start-up is tolerated.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use touchwalk_locomotion::config::{at_least, ConfigError};

use crate::device::{DeviceIndex, DeviceNotification};
use crate::events::EventSink;
use crate::scheduler::{ScheduledTask, Scheduler, TaskHandle};
use crate::source::InputSource;

/// Retry timing for controller binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Delay before the first retry (seconds).
    pub initial_retry_delay: f32,

    /// Factor applied to the delay each time the attempt budget runs out.
    pub retry_multiplier: f32,

    /// Failed attempts allowed at one delay before it grows.
    pub max_retry_attempts: u32,

    /// Delay between a device notification and the next bind attempt (seconds).
    pub reconnect_delay: f32,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            initial_retry_delay: 0.25,
            retry_multiplier: 1.2,
            max_retry_attempts: 5,
            reconnect_delay: 0.5,
        }
    }
}

impl BinderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("initial_retry_delay", self.initial_retry_delay, 0.0)?;
        at_least("retry_multiplier", self.retry_multiplier, 1.0)?;
        at_least("reconnect_delay", self.reconnect_delay, 0.0)?;
        Ok(())
    }
}

/// Where the binder is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindState {
    /// Not started.
    Unbound,
    /// Waiting for sources and connected controllers to line up.
    AwaitingMatch,
    /// Every enumerable source is subscribed.
    Bound,
}

/// Result of one bind attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BindOutcome {
    /// Counts disagreed; another attempt is scheduled.
    Retrying { sources: usize, connected: usize, retry_in: f32 },

    /// Counts matched. Lists the sources subscribed by this attempt. With no
    /// controllers connected the binder keeps awaiting a match.
    Bound { newly_bound: Vec<DeviceIndex> },
}

/// Binds controller input sources to the session's event queue.
#[derive(Debug)]
pub struct ControllerBinder {
    config: BinderConfig,
    ignore_grabbed_collisions: bool,
    state: BindState,
    retry_delay: f32,
    attempts_left: u32,
    /// Controllers the host reports as attached.
    connected: BTreeSet<DeviceIndex>,
    /// Sources already subscribed. Only ever grows.
    bound: BTreeSet<DeviceIndex>,
    pending_retry: Option<TaskHandle>,
}

impl ControllerBinder {
    pub fn new(config: BinderConfig, ignore_grabbed_collisions: bool) -> Self {
        Self {
            retry_delay: config.initial_retry_delay,
            attempts_left: config.max_retry_attempts,
            config,
            ignore_grabbed_collisions,
            state: BindState::Unbound,
            connected: BTreeSet::new(),
            bound: BTreeSet::new(),
            pending_retry: None,
        }
    }

    #[inline]
    pub fn state(&self) -> BindState {
        self.state
    }

    /// Delay the next failed attempt will wait before retrying.
    #[inline]
    pub fn retry_delay(&self) -> f32 {
        self.retry_delay
    }

    #[inline]
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    pub fn is_bound(&self, index: DeviceIndex) -> bool {
        self.bound.contains(&index)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    pub fn connected(&self) -> impl Iterator<Item = DeviceIndex> + '_ {
        self.connected.iter().copied()
    }

    /// Begin waiting for controllers and queue an immediate attempt.
    pub fn start(&mut self, scheduler: &mut Scheduler) {
        self.state = BindState::AwaitingMatch;
        self.reschedule(scheduler, 0.0);
    }

    /// Try to bind. Safe to call any number of times; a source is only
    /// ever subscribed once.
    pub fn attempt(
        &mut self,
        sources: &mut [Box<dyn InputSource>],
        sink: &EventSink,
        scheduler: &mut Scheduler,
    ) -> BindOutcome {
        if let Some(handle) = self.pending_retry.take() {
            scheduler.cancel(handle);
        }

        if sources.len() != self.connected.len() {
            if self.attempts_left > 0 {
                self.attempts_left -= 1;
            } else {
                self.retry_delay *= self.config.retry_multiplier;
                self.attempts_left = self.config.max_retry_attempts;
                log::warn!(
                    "waiting for controllers to initialise, retrying in {:.3}s",
                    self.retry_delay
                );
            }
            log::debug!(
                "bind attempt: {} input sources, {} connected controllers",
                sources.len(),
                self.connected.len()
            );

            self.state = BindState::AwaitingMatch;
            let retry_in = self.retry_delay;
            self.reschedule(scheduler, retry_in);
            return BindOutcome::Retrying {
                sources: sources.len(),
                connected: self.connected.len(),
                retry_in,
            };
        }

        let mut newly_bound = Vec::new();
        for source in sources.iter_mut() {
            let index = source.index();
            if self.bound.contains(&index) {
                continue;
            }

            source.subscribe_axis(sink.clone());
            let grabs = if self.ignore_grabbed_collisions {
                match source.grabber() {
                    Some(grabber) => {
                        grabber.subscribe_grab(sink.clone());
                        true
                    }
                    None => false,
                }
            } else {
                false
            };

            log::debug!("bound input source {} (grab events: {})", index, grabs);
            self.bound.insert(index);
            newly_bound.push(index);
        }

        // Nothing connected yet: keep waiting for a device notification.
        self.state = if self.connected.is_empty() {
            BindState::AwaitingMatch
        } else {
            BindState::Bound
        };
        BindOutcome::Bound { newly_bound }
    }

    /// Track a device attaching or detaching and queue a fresh attempt.
    ///
    /// Non-controller devices are ignored. Returns whether an attempt was queued.
    pub fn on_device_notification(&mut self, notification: DeviceNotification, scheduler: &mut Scheduler) -> bool {
        if !notification.is_controller {
            return false;
        }

        if notification.connected {
            self.connected.insert(notification.index);
        } else {
            self.connected.remove(&notification.index);
        }

        self.state = BindState::AwaitingMatch;
        self.reschedule(scheduler, self.config.reconnect_delay);
        true
    }

    /// Replace any pending retry with one `delay` seconds out.
    fn reschedule(&mut self, scheduler: &mut Scheduler, delay: f32) {
        if let Some(handle) = self.pending_retry.take() {
            scheduler.cancel(handle);
        }
        self.pending_retry = Some(scheduler.schedule_after(delay, ScheduledTask::BindControllers));
    }
}
