// libs/booking-cell/src/services/locks.rs
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-staff advisory locks. The booking path holds a staff member's lock
/// from the first read to the insert, so two racing bookings for the same
/// staff serialize and at most one of an overlapping pair can commit.
pub struct StaffSlotLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl StaffSlotLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub async fn acquire(&self, staff_id: i64) -> OwnedMutexGuard<()> {
        // Clone the Arc out before awaiting; the map shard guard must not be
        // held across the await point.
        let lock = {
            let entry = self.locks.entry(staff_id).or_default();
            Arc::clone(entry.value())
        };
        lock.lock_owned().await
    }
}

impl Default for StaffSlotLocks {
    fn default() -> Self {
        Self::new()
    }
}
