//! Text commands forwarded from the view layer.
//!
//! # Responsibility
//! - Parse one gesture line (`add chair 10 20`, `rotate 3`, ...) into a command.
//! - Apply a command to a collection and describe what happened.
//!
//! # Invariants
//! - Parsing rejects non-finite coordinates; the store itself does not.
//! - Applying a command with a missing id yields `CommandOutcome::Unchanged`.

use crate::model::furniture::{FurnitureId, FurnitureItem, FurnitureKind, Rotation};
use crate::store::collection::FurnitureCollection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One operation requested by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    Add {
        kind: FurnitureKind,
        x: f64,
        y: f64,
    },
    Remove {
        id: FurnitureId,
    },
    Move {
        id: FurnitureId,
        x: f64,
        y: f64,
    },
    Rotate {
        id: FurnitureId,
    },
    Clear,
    Count,
    List,
}

/// Observable result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(FurnitureItem),
    Removed(FurnitureId),
    Moved(FurnitureId),
    Rotated(FurnitureId, Rotation),
    /// Target id did not exist; nothing changed.
    Unchanged(FurnitureId),
    Cleared {
        removed: usize,
    },
    Count(usize),
    Listing(Vec<FurnitureItem>),
}

impl Display for CommandOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added(item) => write!(
                f,
                "added {} {} at ({}, {})",
                item.id, item.kind, item.x, item.y
            ),
            Self::Removed(id) => write!(f, "removed {id}"),
            Self::Moved(id) => write!(f, "moved {id}"),
            Self::Rotated(id, rotation) => write!(f, "rotated {id} to {rotation}"),
            Self::Unchanged(id) => write!(f, "no item {id}"),
            Self::Cleared { removed } => write!(f, "cleared {removed} item(s)"),
            Self::Count(count) => write!(f, "{count} item(s)"),
            Self::Listing(items) => {
                if items.is_empty() {
                    return write!(f, "(empty)");
                }
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(
                        f,
                        "{} {} ({}, {}) {}",
                        item.id, item.kind, item.x, item.y, item.rotation
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// First word is not a known verb.
    UnknownVerb(String),
    /// A required argument is absent.
    MissingArgument {
        verb: &'static str,
        argument: &'static str,
    },
    /// Coordinate is not a finite number.
    InvalidNumber(String),
    /// Id is not a non-negative integer.
    InvalidId(String),
    /// Extra words after a complete command.
    TrailingInput(String),
}

impl Display for CommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVerb(verb) => write!(f, "unknown command `{verb}`"),
            Self::MissingArgument { verb, argument } => {
                write!(f, "`{verb}` is missing argument <{argument}>")
            }
            Self::InvalidNumber(raw) => write!(f, "invalid coordinate `{raw}`"),
            Self::InvalidId(raw) => write!(f, "invalid furniture id `{raw}`"),
            Self::TrailingInput(rest) => write!(f, "unexpected trailing input `{rest}`"),
        }
    }
}

impl Error for CommandParseError {}

impl LayoutCommand {
    /// Parses one command line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    ///
    /// # Errors
    /// - See `CommandParseError` variants.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" | "place" => Self::Add {
                kind: next_word(&mut words, "add", "type")?.to_string(),
                x: next_coordinate(&mut words, "add", "x")?,
                y: next_coordinate(&mut words, "add", "y")?,
            },
            "remove" | "rm" => Self::Remove {
                id: next_id(&mut words, "remove")?,
            },
            "move" => Self::Move {
                id: next_id(&mut words, "move")?,
                x: next_coordinate(&mut words, "move", "x")?,
                y: next_coordinate(&mut words, "move", "y")?,
            },
            "rotate" => Self::Rotate {
                id: next_id(&mut words, "rotate")?,
            },
            "clear" => Self::Clear,
            "count" => Self::Count,
            "list" => Self::List,
            other => return Err(CommandParseError::UnknownVerb(other.to_string())),
        };

        let rest = words.collect::<Vec<_>>();
        if !rest.is_empty() {
            return Err(CommandParseError::TrailingInput(rest.join(" ")));
        }

        Ok(Some(command))
    }
}

/// Applies `command` to `collection`.
pub fn apply_command(
    collection: &mut FurnitureCollection,
    command: LayoutCommand,
) -> CommandOutcome {
    match command {
        LayoutCommand::Add { kind, x, y } => CommandOutcome::Added(collection.add(kind, x, y)),
        LayoutCommand::Remove { id } => {
            if collection.remove(id) {
                CommandOutcome::Removed(id)
            } else {
                CommandOutcome::Unchanged(id)
            }
        }
        LayoutCommand::Move { id, x, y } => {
            if collection.update_position(id, x, y) {
                CommandOutcome::Moved(id)
            } else {
                CommandOutcome::Unchanged(id)
            }
        }
        LayoutCommand::Rotate { id } => match collection.rotate(id) {
            Some(rotation) => CommandOutcome::Rotated(id, rotation),
            None => CommandOutcome::Unchanged(id),
        },
        LayoutCommand::Clear => {
            let removed = collection.count();
            collection.clear();
            CommandOutcome::Cleared { removed }
        }
        LayoutCommand::Count => CommandOutcome::Count(collection.count()),
        LayoutCommand::List => CommandOutcome::Listing(collection.items().to_vec()),
    }
}

fn next_word<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandParseError> {
    words
        .next()
        .ok_or(CommandParseError::MissingArgument { verb, argument })
}

fn next_coordinate<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
    argument: &'static str,
) -> Result<f64, CommandParseError> {
    let raw = next_word(words, verb, argument)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandParseError::InvalidNumber(raw.to_string())),
    }
}

fn next_id<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &'static str,
) -> Result<FurnitureId, CommandParseError> {
    let raw = next_word(words, verb, "id")?;
    raw.parse::<u64>()
        .map(FurnitureId::new)
        .map_err(|_| CommandParseError::InvalidId(raw.to_string()))
}
