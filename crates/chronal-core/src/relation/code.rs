//! Boundary position classes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RelationError;

/// Where one boundary of an interval sits relative to a reference span.
///
/// Codes are totally ordered from left to right. [`RelationCode::None`] is a
/// sentinel for "not comparable", not a position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RelationCode {
    /// Not comparable.
    None = 0,
    /// Strictly before the reference start.
    Left = 1,
    /// Exactly at the reference start.
    AtLeft = 2,
    /// Strictly between the reference start and end.
    Inside = 3,
    /// Exactly at the reference end.
    AtRight = 4,
    /// Strictly after the reference end.
    Right = 5,
}

impl RelationCode {
    /// All six codes in ascending order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Left,
        Self::AtLeft,
        Self::Inside,
        Self::AtRight,
        Self::Right,
    ];

    /// Raw numeric value, `0..=5`.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Parse a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::InvalidCode`] for values above 5. The error
    /// names the `side` it was given so callers can report which boundary
    /// was wrong.
    pub const fn from_value(side: &'static str, value: u8) -> Result<Self, RelationError> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Left),
            2 => Ok(Self::AtLeft),
            3 => Ok(Self::Inside),
            4 => Ok(Self::AtRight),
            5 => Ok(Self::Right),
            _ => Err(RelationError::InvalidCode { side, value }),
        }
    }

    /// Whether this is the "not comparable" code.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The same position seen from the other end of the time line.
    ///
    /// `Left ↔ Right`, `AtLeft ↔ AtRight`; `Inside` and `None` are fixed.
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Left => Self::Right,
            Self::AtLeft => Self::AtRight,
            Self::Inside => Self::Inside,
            Self::AtRight => Self::AtLeft,
            Self::Right => Self::Left,
        }
    }

    /// Upper-case constant name, as used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Left => "LEFT",
            Self::AtLeft => "AT_LEFT",
            Self::Inside => "INSIDE",
            Self::AtRight => "AT_RIGHT",
            Self::Right => "RIGHT",
        }
    }
}

impl TryFrom<u8> for RelationCode {
    type Error = RelationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value("relation", value)
    }
}

impl From<RelationCode> for u8 {
    fn from(code: RelationCode) -> Self {
        code.value()
    }
}

impl fmt::Display for RelationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
