//! Device and collider identifiers shared with the host.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Stable index of a tracked device (headset, controller, base station...).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct DeviceIndex(pub u32);
impl fmt::Display for DeviceIndex { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "device#{}", self.0) } }

/// Host handle to a collider that can take part in collision filtering.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ColliderHandle(pub u32);
impl fmt::Display for ColliderHandle { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "collider#{}", self.0) } }

/// Broadcast by the host whenever any tracked device attaches or detaches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceNotification {
    pub index: DeviceIndex,
    /// Only controllers matter for binding; other devices are ignored.
    pub is_controller: bool,
    pub connected: bool,
}

impl DeviceNotification {
    pub fn controller_connected(index: u32) -> Self {
        Self { index: DeviceIndex(index), is_controller: true, connected: true }
    }

    pub fn controller_disconnected(index: u32) -> Self {
        Self { index: DeviceIndex(index), is_controller: true, connected: false }
    }
}
