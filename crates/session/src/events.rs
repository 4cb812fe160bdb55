//! Controller event delivery.
//!
//! Input sources never call into the controller directly. Once subscribed
//! they push [`ControllerEvent`]s into an [`EventSink`]; the session drains
//! the matching [`EventQueue`] between updates, so event handling is always
//! serialized with the frame and fixed-step callbacks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;

use crate::device::{ColliderHandle, DeviceIndex};

/// Something a bound controller reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// The touchpad axis moved (`x` strafe, `y` forward).
    AxisChanged { source: DeviceIndex, axis: Vec2 },

    /// The touchpad is no longer touched.
    AxisReleased { source: DeviceIndex },

    /// The controller picked up an object.
    Grabbed { source: DeviceIndex, object: ColliderHandle },

    /// The controller let go of an object.
    Ungrabbed { source: DeviceIndex, object: ColliderHandle },
}

impl ControllerEvent {
    /// Device that produced the event.
    pub fn source(&self) -> DeviceIndex {
        match *self {
            Self::AxisChanged { source, .. }
            | Self::AxisReleased { source }
            | Self::Grabbed { source, .. }
            | Self::Ungrabbed { source, .. } => source,
        }
    }
}

type Shared = Rc<RefCell<VecDeque<ControllerEvent>>>;

/// Write end handed to subscribed sources.
#[derive(Debug, Clone)]
pub struct EventSink {
    queue: Shared,
}

impl EventSink {
    /// Queue an event for the next pump.
    pub fn push(&self, event: ControllerEvent) {
        self.queue.borrow_mut().push_back(event);
    }
}

/// Read end owned by the session.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: Shared,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create another write end for a subscriber.
    pub fn sink(&self) -> EventSink {
        EventSink { queue: Rc::clone(&self.queue) }
    }

    /// Take every queued event in arrival order.
    pub fn drain(&self) -> Vec<ControllerEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinks_share_one_queue_in_order() {
        let queue = EventQueue::new();
        let left = queue.sink();
        let right = queue.sink();

        left.push(ControllerEvent::AxisChanged { source: DeviceIndex(1), axis: Vec2::Y });
        right.push(ControllerEvent::AxisReleased { source: DeviceIndex(2) });
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(events[0].source(), DeviceIndex(1));
        assert_eq!(events[1].source(), DeviceIndex(2));
        assert!(queue.is_empty());
    }
}
