//! Core state for the room-layout editor.
//! This crate is the single source of truth for placed-furniture invariants.

pub mod command;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;

pub use command::{apply_command, CommandOutcome, CommandParseError, LayoutCommand};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::furniture::{FurnitureId, FurnitureItem, FurnitureKind, Rotation, RotationError};
pub use session::{LayoutSession, SessionId};
pub use store::collection::{
    FurnitureCollection, FurnitureIdGenerator, LayoutError, LayoutSnapshot,
};
pub use store::shared::SharedFurnitureCollection;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
