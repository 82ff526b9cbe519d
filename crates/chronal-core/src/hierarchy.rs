//! Relation resolution across the granularity tree.
//!
//! Two objects can sit at different depths (a month and a day, a day and
//! its year). They are compared through their **boundaries**, each written
//! as a path of sequence numbers from the root:
//!
//! - An object starts where its path starts. If it is the first child of
//!   its parent it starts where the parent starts, so the path is lifted to
//!   the parent's, repeatedly. After lifting, equal instants have equal
//!   paths.
//! - An object ends where its successor at the same granularity starts.
//!   Stepping past the last child of a parent lands on the first child of
//!   the next parent, which lifts to that parent's start.
//!
//! Lifted paths compare lexicographically with a prefix sorting first: the
//! common prefix is the common ancestor, the first differing sequence
//! number decides. A [`Span`] of two boundaries classifies against another
//! span to give a [`Relation`], which makes the result antisymmetric by
//! construction: `relate(b, a) == relate(a, b).inverse()`.
//!
//! Objects from different calendars, or from trees with different root
//! granularities, are [`Relation::unrelated`].

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::calendar::same_calendar;
use crate::error::CalendarError;
use crate::object::TimeObject;
use crate::relation::{Relation, RelationCode};

/// An instant on a calendar's time line.
///
/// Variant order is time order; paths compare lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Boundary {
    /// Before everything; the start of a range with no lower bound.
    NegativeInfinity,
    /// The start of the object at this (lifted) path.
    At(Vec<i64>),
    /// After everything; the end of a range with no upper bound, or of the
    /// last object a calendar has.
    PositiveInfinity,
}

/// A stretch of time between two boundaries, `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    start: Boundary,
    end: Boundary,
}

impl Span {
    /// Returns `None` if `start > end`.
    #[must_use]
    pub fn try_new(start: Boundary, end: Boundary) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// All of time.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: Boundary::NegativeInfinity,
            end: Boundary::PositiveInfinity,
        }
    }

    #[must_use]
    pub const fn start(&self) -> &Boundary {
        &self.start
    }

    #[must_use]
    pub const fn end(&self) -> &Boundary {
        &self.end
    }

    /// Classify this span against `reference`.
    #[must_use]
    pub fn relate(&self, reference: &Self) -> Relation {
        Relation::new_unchecked(
            classify(&self.start, reference),
            classify(&self.end, reference),
        )
    }
}

fn classify(point: &Boundary, reference: &Span) -> RelationCode {
    match point.cmp(&reference.start) {
        Ordering::Less => RelationCode::Left,
        Ordering::Equal => RelationCode::AtLeft,
        Ordering::Greater => match point.cmp(&reference.end) {
            Ordering::Less => RelationCode::Inside,
            Ordering::Equal => RelationCode::AtRight,
            Ordering::Greater => RelationCode::Right,
        },
    }
}

/// Returns `true` if `a` and `b` live in the same calendar and the same
/// tree, so that a relation between them exists.
#[must_use]
pub fn comparable(a: &TimeObject, b: &TimeObject) -> bool {
    same_calendar(a.calendar(), b.calendar()) && a.root().granularity() == b.root().granularity()
}

/// Resolve how `a` relates to `b`.
///
/// # Errors
///
/// Propagates errors from the calendar's `next` and `children`, which the
/// boundary computation needs.
pub fn relate(a: &TimeObject, b: &TimeObject) -> Result<Relation, CalendarError> {
    if a == b {
        return Ok(Relation::equal());
    }
    if !comparable(a, b) {
        debug!(?a, ?b, "objects share no hierarchy; unrelated");
        return Ok(Relation::unrelated());
    }

    let relation = span_of(a)?.relate(&span_of(b)?);
    trace!(?a, ?b, relation = relation.name(), "resolved relation");
    Ok(relation)
}

/// The span covered by `object`.
///
/// # Errors
///
/// Propagates calendar errors.
pub fn span_of(object: &TimeObject) -> Result<Span, CalendarError> {
    let start = start_boundary(object)?;
    let end = end_boundary(object)?;
    Ok(Span { start, end })
}

/// Where `object` starts, lifted through every first-child position.
///
/// # Errors
///
/// Propagates [`Calendar::children`](crate::calendar::Calendar::children) errors.
pub fn start_boundary(object: &TimeObject) -> Result<Boundary, CalendarError> {
    let mut current = object;
    while let Some(parent) = current.parent() {
        if parent.first_child()?.as_ref() != Some(current) {
            break;
        }
        current = parent;
    }
    Ok(Boundary::At(current.path()))
}

/// Where `object` ends: the start of its successor.
///
/// # Errors
///
/// Propagates [`Calendar::next`](crate::calendar::Calendar::next) and
/// [`Calendar::children`](crate::calendar::Calendar::children) errors.
pub fn end_boundary(object: &TimeObject) -> Result<Boundary, CalendarError> {
    match object.next()? {
        Some(next) => start_boundary(&next),
        None => Ok(Boundary::PositiveInfinity),
    }
}
