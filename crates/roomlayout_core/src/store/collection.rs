//! Ordered in-memory furniture collection.
//!
//! # Responsibility
//! - Hold the placed items of one editing session in insertion order.
//! - Provide add/remove/move/rotate/clear mutations and a count query.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - Ids are not handed out twice until the `u64` sequence is used up.
//! - Removal excises the item without reordering the rest.
//! - Operations referencing a missing id are silent no-ops, not errors.
//! - `count()` is always derived from the backing sequence.

use crate::model::furniture::{FurnitureId, FurnitureItem, FurnitureKind, Rotation};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Monotonic id source owned by one collection.
///
/// `None` once `u64::MAX` has been handed out (or seeded past).
#[derive(Debug, Clone)]
pub struct FurnitureIdGenerator {
    next: Option<u64>,
}

impl FurnitureIdGenerator {
    /// Starts handing out ids from 1.
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Starts handing out ids right after `last`.
    pub fn after(last: FurnitureId) -> Self {
        Self {
            next: last.get().checked_add(1),
        }
    }

    /// Returns the next id of the sequence, or `None` when it is used up.
    pub fn next_id(&mut self) -> Option<FurnitureId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(FurnitureId::new(id))
    }
}

impl Default for FurnitureIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned, serializable copy of a collection's items in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub items: Vec<FurnitureItem>,
}

/// Errors from rebuilding a collection out of external data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Two items in the input share one id.
    DuplicateId(FurnitureId),
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate furniture id in layout: {id}"),
        }
    }
}

impl Error for LayoutError {}

/// Placed furniture of one editing session.
#[derive(Debug, Clone, Default)]
pub struct FurnitureCollection {
    items: Vec<FurnitureItem>,
    ids: FurnitureIdGenerator,
}

impl FurnitureCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a collection from a snapshot, keeping item order.
    ///
    /// New ids continue after the largest id present in the snapshot. A
    /// snapshot holding `u64::MAX` leaves `add` on the lowest-unused-id path.
    ///
    /// # Errors
    /// - `LayoutError::DuplicateId` when two items share an id.
    pub fn from_snapshot(snapshot: LayoutSnapshot) -> Result<Self, LayoutError> {
        let mut seen = HashSet::with_capacity(snapshot.items.len());
        for item in &snapshot.items {
            if !seen.insert(item.id) {
                return Err(LayoutError::DuplicateId(item.id));
            }
        }

        let ids = snapshot
            .items
            .iter()
            .map(|item| item.id)
            .max()
            .map(FurnitureIdGenerator::after)
            .unwrap_or_default();

        debug!(
            "event=layout_restore module=store status=ok count={}",
            snapshot.items.len()
        );
        Ok(Self {
            items: snapshot.items,
            ids,
        })
    }

    /// Places a new unrotated item at the end of the sequence.
    ///
    /// Never fails; kind and coordinates are not validated.
    pub fn add(&mut self, kind: impl Into<FurnitureKind>, x: f64, y: f64) -> FurnitureItem {
        let id = self.fresh_id();
        let item = FurnitureItem::new(id, kind, x, y);
        self.items.push(item.clone());
        debug!(
            "event=furniture_add module=store status=ok id={} count={}",
            item.id,
            self.items.len()
        );
        item
    }

    /// Removes the first item with `id`.
    ///
    /// Returns `false` (and leaves the sequence untouched) when no item matches.
    pub fn remove(&mut self, id: FurnitureId) -> bool {
        let Some(index) = self.position_of(id) else {
            debug!("event=furniture_remove module=store status=noop id={id}");
            return false;
        };
        self.items.remove(index);
        debug!(
            "event=furniture_remove module=store status=ok id={id} count={}",
            self.items.len()
        );
        true
    }

    /// Moves the first item with `id` to `(x, y)`.
    ///
    /// Returns `false` when no item matches.
    pub fn update_position(&mut self, id: FurnitureId, x: f64, y: f64) -> bool {
        let Some(item) = self.find_mut(id) else {
            debug!("event=furniture_move module=store status=noop id={id}");
            return false;
        };
        item.move_to(x, y);
        debug!("event=furniture_move module=store status=ok id={id}");
        true
    }

    /// Turns the first item with `id` a quarter turn.
    ///
    /// Returns the new rotation, or `None` when no item matches.
    pub fn rotate(&mut self, id: FurnitureId) -> Option<Rotation> {
        let Some(item) = self.find_mut(id) else {
            debug!("event=furniture_rotate module=store status=noop id={id}");
            return None;
        };
        let rotation = item.rotate();
        debug!("event=furniture_rotate module=store status=ok id={id} rotation={rotation}");
        Some(rotation)
    }

    /// Discards all items. Ids already handed out stay retired.
    pub fn clear(&mut self) {
        let removed = self.items.len();
        self.items.clear();
        debug!("event=furniture_clear module=store status=ok removed={removed}");
    }

    /// Number of placed items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the first item with `id`.
    pub fn get(&self, id: FurnitureId) -> Option<&FurnitureItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[FurnitureItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FurnitureItem> {
        self.items.iter()
    }

    /// Copies the current items into a serializable snapshot.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            items: self.items.clone(),
        }
    }

    /// Next sequence id; once the sequence is used up, the lowest id no
    /// current item holds. Retired ids are only reused in that case.
    fn fresh_id(&mut self) -> FurnitureId {
        if let Some(id) = self.ids.next_id() {
            return id;
        }
        let taken = self.items.iter().map(|item| item.id).collect::<HashSet<_>>();
        let id = (1..=u64::MAX)
            .map(FurnitureId::new)
            .find(|id| !taken.contains(id))
            .unwrap_or(FurnitureId::new(0));
        debug!("event=furniture_id_reuse module=store status=ok id={id}");
        id
    }

    fn position_of(&self, id: FurnitureId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn find_mut(&mut self, id: FurnitureId) -> Option<&mut FurnitureItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

impl<'a> IntoIterator for &'a FurnitureCollection {
    type Item = &'a FurnitureItem;
    type IntoIter = std::slice::Iter<'a, FurnitureItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
