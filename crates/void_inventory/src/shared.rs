//! Shared inventory handle
//!
//! [`Inventory`] does no locking of its own. Hosts that reach one inventory
//! from several threads wrap it here so every operation runs under a single
//! per-inventory mutex.

use crate::inventory::Inventory;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Cloneable, mutex-guarded handle to one inventory
#[derive(Debug, Clone)]
pub struct SharedInventory {
    inner: Arc<Mutex<Inventory>>,
}

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    /// Lock the inventory for a sequence of operations.
    ///
    /// Event handlers run while this lock is held and must not lock the
    /// same handle again.
    pub fn lock(&self) -> MutexGuard<'_, Inventory> {
        self.inner.lock()
    }

    /// Run one closure under the lock
    pub fn with<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl From<Inventory> for SharedInventory {
    fn from(inventory: Inventory) -> Self {
        Self::new(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDefinition, ItemType};
    use std::thread;

    #[test]
    fn test_concurrent_adds() {
        let shared = SharedInventory::new(Inventory::new(10, 10).unwrap());
        let ore = ItemDefinition::new("ore", "Iron Ore")
            .with_type(ItemType::Resource)
            .with_max_stack(50)
            .into_ref();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let ore = ore.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.with(|inv| inv.try_add_item(&ore, 1).unwrap());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let inv = shared.lock();
        assert_eq!(inv.count_item(&ore.id), 100);
        assert_eq!(inv.used_slots(), 2);
    }
}
