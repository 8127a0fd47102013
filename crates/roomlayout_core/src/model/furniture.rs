//! Furniture domain model.
//!
//! # Responsibility
//! - Define the placed-item record rendered by the layout view.
//! - Keep rotation quantized to quarter turns at the type level.
//!
//! # Invariants
//! - `FurnitureId` is unique within one collection and never reused there.
//! - `Rotation` can only hold 0, 90, 180 or 270 degrees.
//! - `kind`, `x` and `y` are caller-defined and never validated here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of one placed item.
///
/// Handed out by the owning collection from a monotonic counter, so bulk
/// placement within the same millisecond still yields distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FurnitureId(u64);

impl FurnitureId {
    /// Wraps a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for FurnitureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FurnitureId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Opaque furniture kind tag (`chair`, `sofa`, ...).
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type FurnitureKind = String;

/// Quarter-turn rotation of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "i64")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations in turning order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Builds a rotation from any multiple of 90 degrees.
    ///
    /// Negative values and values >= 360 are reduced into `[0, 360)`.
    ///
    /// # Errors
    /// - `RotationError::NotQuarterTurn` when `degrees` is not a multiple of 90.
    pub fn from_degrees(degrees: i64) -> Result<Self, RotationError> {
        if degrees % 90 != 0 {
            return Err(RotationError::NotQuarterTurn(degrees));
        }
        Ok(match degrees.rem_euclid(360) {
            0 => Self::Deg0,
            90 => Self::Deg90,
            180 => Self::Deg180,
            _ => Self::Deg270,
        })
    }

    /// Returns the rotation in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns `(self + 90) mod 360`.
    pub const fn next_quarter_turn(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

impl TryFrom<i64> for Rotation {
    type Error = RotationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_degrees(value)
    }
}

/// Rejected rotation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    /// Angle is not a whole number of quarter turns.
    NotQuarterTurn(i64),
}

impl Display for RotationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotQuarterTurn(degrees) => {
                write!(f, "rotation must be a multiple of 90 degrees, got {degrees}")
            }
        }
    }
}

impl Error for RotationError {}

/// One placed piece of furniture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: FurnitureId,
    /// Serialized as `type` to match the view layer's naming.
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

impl FurnitureItem {
    /// Creates an unrotated item at the given position.
    pub fn new(id: FurnitureId, kind: impl Into<FurnitureKind>, x: f64, y: f64) -> Self {
        Self {
            id,
            kind: kind.into(),
            x,
            y,
            rotation: Rotation::Deg0,
        }
    }

    /// Overwrites the position, leaving kind and rotation untouched.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Turns the item one quarter turn clockwise and returns the new rotation.
    pub fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.next_quarter_turn();
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::{FurnitureId, FurnitureItem, Rotation, RotationError};

    #[test]
    fn from_degrees_normalizes_into_range() {
        assert_eq!(Rotation::from_degrees(0), Ok(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(450), Ok(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90), Ok(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(720), Ok(Rotation::Deg0));
    }

    #[test]
    fn from_degrees_rejects_partial_turns() {
        assert_eq!(
            Rotation::from_degrees(45),
            Err(RotationError::NotQuarterTurn(45))
        );
    }

    #[test]
    fn quarter_turns_cycle_through_all_values() {
        let mut rotation = Rotation::Deg0;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(rotation.degrees());
            rotation = rotation.next_quarter_turn();
        }
        assert_eq!(seen, vec![0, 90, 180, 270]);
        assert_eq!(rotation, Rotation::Deg0);
    }

    #[test]
    fn item_rotate_keeps_position() {
        let mut item = FurnitureItem::new(FurnitureId::new(7), "desk", 1.5, -2.0);
        assert_eq!(item.rotate(), Rotation::Deg90);
        assert_eq!((item.x, item.y), (1.5, -2.0));
        assert_eq!(item.kind, "desk");
    }
}
