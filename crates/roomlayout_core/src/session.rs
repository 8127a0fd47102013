//! Per-session layout context.
//!
//! # Responsibility
//! - Own the furniture collection of one editing session.
//! - Be passed explicitly to whichever view/controller needs it.
//!
//! # Invariants
//! - A session starts with an empty collection.
//! - Sessions are never stored in process-wide state.

use crate::command::{apply_command, CommandOutcome, LayoutCommand};
use crate::store::collection::FurnitureCollection;
use log::info;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable session identifier used for log correlation.
pub type SessionId = Uuid;

/// One editing session and the layout it owns.
#[derive(Debug)]
pub struct LayoutSession {
    id: SessionId,
    started_at_ms: i64,
    collection: FurnitureCollection,
}

impl LayoutSession {
    /// Starts a session with an empty layout.
    pub fn start() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at_ms: now_epoch_ms(),
            collection: FurnitureCollection::new(),
        };
        info!(
            "event=session_start module=session status=ok session={}",
            session.id
        );
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Unix epoch milliseconds at `start()`.
    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    /// Milliseconds since `start()`, clamped at zero if the clock went back.
    pub fn elapsed_ms(&self) -> i64 {
        now_epoch_ms().saturating_sub(self.started_at_ms).max(0)
    }

    pub fn collection(&self) -> &FurnitureCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut FurnitureCollection {
        &mut self.collection
    }

    /// Applies one forwarded command to this session's layout.
    pub fn apply(&mut self, command: LayoutCommand) -> CommandOutcome {
        apply_command(&mut self.collection, command)
    }

    /// Ends the session and hands back its final layout.
    pub fn end(self) -> FurnitureCollection {
        info!(
            "event=session_end module=session status=ok session={} started_at_ms={} duration_ms={} count={}",
            self.id,
            self.started_at_ms,
            self.elapsed_ms(),
            self.collection.count()
        );
        self.collection
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
