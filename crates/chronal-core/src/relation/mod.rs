//! Interval relation algebra.
//!
//! A [`Relation`] describes how an interval **A** sits against a reference
//! interval **B** by classifying each of A's two boundaries with a
//! [`RelationCode`]:
//!
//! ```text
//!          LEFT  AT_LEFT  INSIDE  AT_RIGHT  RIGHT
//!     ──────────────[=========B=========]──────────────
//! ```
//!
//! The pair `(left_code, right_code)` always satisfies
//! `left_code <= right_code`. Fifteen pairs are possible between two
//! positions, each with a canonical name; together with
//! [`Relation::unrelated`] that makes sixteen values. Relations are plain
//! `Copy` values, so two constructions from the same codes are the same
//! value.
//!
//! - [`code`]: the [`RelationCode`] position classes.
//! - [`text`]: the nine-character diagnostic diagram.

pub mod code;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use code::RelationCode;

use crate::error::RelationError;

const AT_LEFT: u8 = RelationCode::AtLeft.value();
const AT_RIGHT: u8 = RelationCode::AtRight.value();

/// How one interval relates to a reference interval.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RelationRepr", into = "RelationRepr")]
pub struct Relation {
    left: RelationCode,
    right: RelationCode,
}

/// Wire shape; deserialization goes back through [`Relation::of_sides`].
#[derive(Serialize, Deserialize)]
struct RelationRepr {
    left: RelationCode,
    right: RelationCode,
}

impl TryFrom<RelationRepr> for Relation {
    type Error = RelationError;

    fn try_from(repr: RelationRepr) -> Result<Self, Self::Error> {
        Self::of_sides(repr.left, repr.right)
    }
}

impl From<Relation> for RelationRepr {
    fn from(relation: Relation) -> Self {
        Self {
            left: relation.left,
            right: relation.right,
        }
    }
}

/// Canonical names in glossary order.
const NAMED: [(&str, Relation); 16] = [
    ("unrelated", Relation::unrelated()),
    ("left", Relation::left()),
    ("left_adjoining", Relation::left_adjoining()),
    ("left_intersecting", Relation::left_intersecting()),
    ("left_overlapping", Relation::left_overlapping()),
    ("overlapping", Relation::overlapping()),
    ("at_left", Relation::at_left()),
    ("left_inside", Relation::left_inside()),
    ("equal", Relation::equal()),
    ("right_overlapping", Relation::right_overlapping()),
    ("inside", Relation::inside()),
    ("right_inside", Relation::right_inside()),
    ("right_intersecting", Relation::right_intersecting()),
    ("at_right", Relation::at_right()),
    ("right_adjoining", Relation::right_adjoining()),
    ("right", Relation::right()),
];

impl Relation {
    /// Build a relation from its two boundary classes.
    ///
    /// If either side is [`RelationCode::None`] the result is
    /// [`Relation::unrelated`], whatever the other side says.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::OutOfOrder`] when `left > right`.
    pub fn of_sides(left: RelationCode, right: RelationCode) -> Result<Self, RelationError> {
        if left.is_none() || right.is_none() {
            return Ok(Self::unrelated());
        }
        if left > right {
            return Err(RelationError::OutOfOrder { left, right });
        }
        Ok(Self { left, right })
    }

    /// Build a relation from raw numeric codes.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::InvalidCode`] when either value is outside
    /// `0..=5`, or [`RelationError::OutOfOrder`] as for
    /// [`Relation::of_sides`].
    pub fn from_raw(left: u8, right: u8) -> Result<Self, RelationError> {
        let left = RelationCode::from_value("left", left)?;
        let right = RelationCode::from_value("right", right)?;
        Self::of_sides(left, right)
    }

    /// Build a relation from codes already known to be ordered.
    ///
    /// The ordering is only checked in debug builds.
    pub(crate) const fn new_unchecked(left: RelationCode, right: RelationCode) -> Self {
        debug_assert!(
            left.value() <= right.value(),
            "left relation code must not exceed right relation code"
        );
        if left.is_none() || right.is_none() {
            return Self::unrelated();
        }
        Self { left, right }
    }

    // -----------------------------------------------------------------------
    // Named relations
    // -----------------------------------------------------------------------

    /// The two intervals cannot be compared.
    #[must_use]
    pub const fn unrelated() -> Self {
        Self {
            left: RelationCode::None,
            right: RelationCode::None,
        }
    }

    /// A ends strictly before B starts.
    #[must_use]
    pub const fn left() -> Self {
        Self::new_unchecked(RelationCode::Left, RelationCode::Left)
    }

    /// A ends exactly where B starts.
    #[must_use]
    pub const fn left_adjoining() -> Self {
        Self::new_unchecked(RelationCode::Left, RelationCode::AtLeft)
    }

    /// A starts before B and ends inside it.
    #[must_use]
    pub const fn left_intersecting() -> Self {
        Self::new_unchecked(RelationCode::Left, RelationCode::Inside)
    }

    /// A starts before B and ends with it.
    #[must_use]
    pub const fn left_overlapping() -> Self {
        Self::new_unchecked(RelationCode::Left, RelationCode::AtRight)
    }

    /// A starts before and ends after B.
    #[must_use]
    pub const fn overlapping() -> Self {
        Self::new_unchecked(RelationCode::Left, RelationCode::Right)
    }

    /// A is a point at B's start.
    #[must_use]
    pub const fn at_left() -> Self {
        Self::new_unchecked(RelationCode::AtLeft, RelationCode::AtLeft)
    }

    /// A starts with B and ends inside it.
    #[must_use]
    pub const fn left_inside() -> Self {
        Self::new_unchecked(RelationCode::AtLeft, RelationCode::Inside)
    }

    /// A and B occupy the same span.
    #[must_use]
    pub const fn equal() -> Self {
        Self::new_unchecked(RelationCode::AtLeft, RelationCode::AtRight)
    }

    /// A starts with B and ends after it.
    #[must_use]
    pub const fn right_overlapping() -> Self {
        Self::new_unchecked(RelationCode::AtLeft, RelationCode::Right)
    }

    /// A lies strictly within B.
    #[must_use]
    pub const fn inside() -> Self {
        Self::new_unchecked(RelationCode::Inside, RelationCode::Inside)
    }

    /// A starts inside B and ends with it.
    #[must_use]
    pub const fn right_inside() -> Self {
        Self::new_unchecked(RelationCode::Inside, RelationCode::AtRight)
    }

    /// A starts inside B and ends after it.
    #[must_use]
    pub const fn right_intersecting() -> Self {
        Self::new_unchecked(RelationCode::Inside, RelationCode::Right)
    }

    /// A is a point at B's end.
    #[must_use]
    pub const fn at_right() -> Self {
        Self::new_unchecked(RelationCode::AtRight, RelationCode::AtRight)
    }

    /// A starts exactly where B ends.
    #[must_use]
    pub const fn right_adjoining() -> Self {
        Self::new_unchecked(RelationCode::AtRight, RelationCode::Right)
    }

    /// A starts strictly after B ends.
    #[must_use]
    pub const fn right() -> Self {
        Self::new_unchecked(RelationCode::Right, RelationCode::Right)
    }

    /// All sixteen canonical relations, `unrelated` first.
    pub fn all() -> impl Iterator<Item = Self> {
        NAMED.into_iter().map(|(_, relation)| relation)
    }

    /// Canonical snake_case name, e.g. `"left_adjoining"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMED
            .iter()
            .find(|(_, relation)| *relation == self)
            .map_or("unrelated", |(name, _)| *name)
    }

    // -----------------------------------------------------------------------
    // Codes
    // -----------------------------------------------------------------------

    /// Classification of A's start boundary.
    #[must_use]
    pub const fn left_code(self) -> RelationCode {
        self.left
    }

    /// Classification of A's end boundary.
    #[must_use]
    pub const fn right_code(self) -> RelationCode {
        self.right
    }

    const fn l(self) -> u8 {
        self.left.value()
    }

    const fn r(self) -> u8 {
        self.right.value()
    }

    /// The relation of B to A, given the relation of A to B.
    ///
    /// For intervals of positive extent this is an involution and maps each
    /// family onto its mirror: `equal ↔ equal`, `inside ↔ overlapping`,
    /// `left ↔ right`, `left_adjoining ↔ right_adjoining`, and so on.
    #[must_use]
    pub const fn inverse(self) -> Self {
        use RelationCode::{AtLeft, AtRight, Inside, Left, Right};

        if !self.exists() {
            return Self::unrelated();
        }
        // B's start, classified against A.
        let start = match self.left {
            Inside | AtRight | Right => Left,
            AtLeft => AtLeft,
            _ => match self.right {
                Left => Right,
                AtLeft => AtRight,
                _ => Inside,
            },
        };
        // B's end, classified against A.
        let end = match self.left {
            Right => Left,
            AtRight => AtLeft,
            _ => match self.right {
                AtRight => AtRight,
                Right => Inside,
                _ => Right,
            },
        };
        Self::new_unchecked(start, end)
    }

    // -----------------------------------------------------------------------
    // Predicates
    // -----------------------------------------------------------------------

    /// A and B are comparable.
    #[must_use]
    pub const fn exists(self) -> bool {
        !self.left.is_none() && !self.right.is_none()
    }

    /// A and B occupy exactly the same span.
    #[must_use]
    pub const fn equals(self) -> bool {
        self.exists() && self.l() == AT_LEFT && self.r() == AT_RIGHT
    }

    /// A's span covers all of B's span.
    #[must_use]
    pub const fn contains(self) -> bool {
        self.exists() && self.l() <= AT_LEFT && self.r() >= AT_RIGHT
    }

    /// A's span lies strictly within B's span.
    #[must_use]
    pub const fn is_contained(self) -> bool {
        self.exists() && self.l() > AT_LEFT && self.r() < AT_RIGHT
    }

    /// A's span lies within B's span; boundaries may coincide.
    ///
    /// This is the operand-swapped form of [`Relation::contains`].
    #[must_use]
    pub const fn is_within(self) -> bool {
        self.exists() && self.l() >= AT_LEFT && self.r() <= AT_RIGHT
    }

    /// A and B share at least one point.
    #[must_use]
    pub const fn intersects(self) -> bool {
        self.exists() && self.l() < AT_RIGHT && self.r() > AT_LEFT
    }

    /// A starts strictly before B starts.
    #[must_use]
    pub const fn is_to_left(self) -> bool {
        self.exists() && self.l() < AT_LEFT
    }

    /// All of A ends at or before B's start.
    #[must_use]
    pub const fn lies_to_left(self) -> bool {
        self.exists() && self.l() < AT_LEFT && self.r() <= AT_LEFT
    }

    /// A ends strictly after B ends.
    #[must_use]
    pub const fn is_to_right(self) -> bool {
        self.exists() && self.r() > AT_RIGHT
    }

    /// All of A starts at or after B's end.
    #[must_use]
    pub const fn lies_to_right(self) -> bool {
        self.exists() && self.l() >= AT_RIGHT && self.r() > AT_RIGHT
    }

    /// A ends exactly where B starts.
    #[must_use]
    pub const fn is_left_adjacent(self) -> bool {
        self.r() == AT_LEFT
    }

    /// A starts exactly where B ends.
    #[must_use]
    pub const fn is_right_adjacent(self) -> bool {
        self.l() == AT_RIGHT
    }

    /// A touches B on either side.
    #[must_use]
    pub const fn is_adjacent(self) -> bool {
        self.is_left_adjacent() || self.is_right_adjacent()
    }

    /// A and B share their start boundary.
    #[must_use]
    pub const fn aligns_left(self) -> bool {
        self.l() == AT_LEFT
    }

    /// A and B share their end boundary.
    #[must_use]
    pub const fn aligns_right(self) -> bool {
        self.r() == AT_RIGHT
    }
}

impl Default for Relation {
    fn default() -> Self {
        Self::unrelated()
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Relation({} {})", self.name(), self.diagram())
    }
}

impl FromStr for Relation {
    type Err = RelationError;

    /// Accepts a canonical name (`left_adjoining`, `leftAdjoining`) or a
    /// nine-character diagram (`==#||||__`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        NAMED
            .iter()
            .find(|(name, _)| !wanted.is_empty() && name.replace('_', "") == wanted)
            .map_or_else(|| Self::from_diagram(s), |(_, relation)| Ok(*relation))
    }
}
