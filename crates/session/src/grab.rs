//! Collision filtering for held objects.
//!
//! While the player holds an object its collider must not shove the body
//! around. Each grab asks the host to ignore collisions between the body and
//! the object; the last matching ungrab restores them. Grabs are counted per
//! object, so holding one object in both hands and letting go with one hand
//! keeps collisions ignored.

use std::collections::HashMap;

use crate::device::ColliderHandle;

/// Host-side physics filter.
pub trait CollisionFilter {
    /// Ignore (or stop ignoring) contacts between two colliders.
    fn set_ignore_collision(&mut self, a: ColliderHandle, b: ColliderHandle, ignore: bool);
}

/// Outstanding grabs per held object.
#[derive(Debug, Default)]
pub struct GrabLedger {
    holds: HashMap<ColliderHandle, u32>,
}

impl GrabLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grab. The first hold on `object` turns collisions off.
    pub fn grab(&mut self, body: ColliderHandle, object: ColliderHandle, filter: &mut dyn CollisionFilter) {
        let count = self.holds.entry(object).or_insert(0);
        *count += 1;
        if *count == 1 {
            log::debug!("ignoring collisions between {} and held {}", body, object);
            filter.set_ignore_collision(body, object, true);
        }
    }

    /// Record an ungrab. Releasing the last hold turns collisions back on.
    /// An ungrab with no matching grab is ignored.
    pub fn ungrab(&mut self, body: ColliderHandle, object: ColliderHandle, filter: &mut dyn CollisionFilter) {
        let Some(count) = self.holds.get_mut(&object) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.holds.remove(&object);
            log::debug!("restoring collisions between {} and released {}", body, object);
            filter.set_ignore_collision(body, object, false);
        }
    }

    /// Number of hands holding `object`.
    pub fn holds(&self, object: ColliderHandle) -> u32 {
        self.holds.get(&object).copied().unwrap_or(0)
    }
}
