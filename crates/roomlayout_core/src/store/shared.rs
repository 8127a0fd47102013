//! Lock-guarded collection for callers on multiple threads.
//!
//! # Responsibility
//! - Share one `FurnitureCollection` between threads behind a single mutex.
//!
//! # Invariants
//! - Each operation holds the lock across its whole find-then-mutate span.
//! - A poisoned lock is recovered: every collection operation leaves a valid
//!   state behind, so the inner value stays consistent.

use crate::model::furniture::{FurnitureId, FurnitureItem, FurnitureKind, Rotation};
use crate::store::collection::{FurnitureCollection, LayoutSnapshot};
use log::warn;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to a collection shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SharedFurnitureCollection {
    inner: Arc<Mutex<FurnitureCollection>>,
}

impl SharedFurnitureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing collection.
    pub fn from_collection(collection: FurnitureCollection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(collection)),
        }
    }

    /// Runs `f` with exclusive access to the collection.
    pub fn with<T>(&self, f: impl FnOnce(&mut FurnitureCollection) -> T) -> T {
        let mut guard = self.lock();
        f(&mut guard)
    }

    pub fn add(&self, kind: impl Into<FurnitureKind>, x: f64, y: f64) -> FurnitureItem {
        self.lock().add(kind, x, y)
    }

    pub fn remove(&self, id: FurnitureId) -> bool {
        self.lock().remove(id)
    }

    pub fn update_position(&self, id: FurnitureId, x: f64, y: f64) -> bool {
        self.lock().update_position(id, x, y)
    }

    pub fn rotate(&self, id: FurnitureId) -> Option<Rotation> {
        self.lock().rotate(id)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    /// Returns a copy of the item with `id`.
    pub fn get(&self, id: FurnitureId) -> Option<FurnitureItem> {
        self.lock().get(id).cloned()
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        self.lock().snapshot()
    }

    fn lock(&self) -> MutexGuard<'_, FurnitureCollection> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("event=lock_recovered module=store status=warn reason=poisoned");
            poisoned.into_inner()
        })
    }
}

impl From<FurnitureCollection> for SharedFurnitureCollection {
    fn from(value: FurnitureCollection) -> Self {
        Self::from_collection(value)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedFurnitureCollection;

    #[test]
    fn clones_share_one_collection() {
        let shared = SharedFurnitureCollection::new();
        let other = shared.clone();
        let item = shared.add("sofa", 1.0, 2.0);
        assert_eq!(other.count(), 1);
        assert!(other.rotate(item.id).is_some());
        assert_eq!(shared.get(item.id).map(|i| i.rotation.degrees()), Some(90));
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = SharedFurnitureCollection::new();
        shared.add("table", 0.0, 0.0);

        let poisoner = shared.clone();
        let result = std::thread::spawn(move || {
            poisoner.with::<()>(|_| panic!("poison the lock"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(shared.count(), 1);
        shared.clear();
        assert_eq!(shared.count(), 0);
    }
}
