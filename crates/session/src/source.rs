//! Capabilities a controller may expose to the binder.

use crate::device::DeviceIndex;
use crate::events::EventSink;

/// A controller-like device that can report touchpad input.
///
/// Subscribing hands the source a sink; from then on it pushes
/// [`AxisChanged`](crate::ControllerEvent::AxisChanged) and
/// [`AxisReleased`](crate::ControllerEvent::AxisReleased) events into it.
pub trait InputSource {
    /// Stable device index of this source.
    fn index(&self) -> DeviceIndex;

    /// Start forwarding axis-change and axis-release events.
    fn subscribe_axis(&mut self, sink: EventSink);

    /// Grab capability, if this source can hold objects.
    fn grabber(&mut self) -> Option<&mut dyn Grabber> {
        None
    }
}

/// A controller that can pick up objects.
pub trait Grabber {
    /// Start forwarding grab and ungrab events.
    fn subscribe_grab(&mut self, sink: EventSink);
}
