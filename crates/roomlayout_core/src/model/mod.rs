//! Domain model for placed furniture.
//!
//! # Responsibility
//! - Define canonical data structures used by the layout store.
//!
//! # Invariants
//! - Every placed item is identified by a `FurnitureId`.
//! - Rotations are quarter turns only.

pub mod furniture;
