//! Deferred task scheduling on a virtual clock.
//!
//! Retries are never busy-waits or sleeps: a task is queued with a delay and
//! handed back to the session once enough frame time has been fed in through
//! [`Scheduler::advance`].

use serde::{Deserialize, Serialize};

/// Work the session knows how to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Try to bind controller input sources.
    BindControllers,
}

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Pending {
    due: f64,
    handle: TaskHandle,
    task: ScheduledTask,
}

/// Single-threaded timer queue.
///
/// Tasks due at the same time run in the order they were scheduled.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of virtual time elapsed.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Run `task` once `delay` seconds from now.
    pub fn schedule_after(&mut self, delay: f32, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            due: self.now + f64::from(delay.max(0.0)),
            handle,
            task,
        });
        handle
    }

    /// Drop a task before it runs. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Whether `handle` is still waiting to run.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Number of tasks waiting.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return every task that became due.
    pub fn advance(&mut self, delta_time: f32) -> Vec<ScheduledTask> {
        self.now += f64::from(delta_time.max(0.0));
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.handle.0.cmp(&b.handle.0)));
        due.into_iter().map(|p| p.task).collect()
    }
}
