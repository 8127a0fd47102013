//! In-memory layout stores.
//!
//! # Responsibility
//! - Own the placed items of a session and expose total mutations on them.
//! - Offer a lock-guarded variant for callers that share one layout.
//!
//! # Invariants
//! - Missing ids never surface as errors from store mutations.

pub mod collection;
pub mod shared;
