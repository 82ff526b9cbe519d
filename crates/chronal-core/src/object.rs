//! Time objects: nodes of a calendar's granularity tree.
//!
//! A [`TimeObject`] is a cheap, shareable handle (`Arc`) to an immutable
//! node. Each node knows its calendar, its [`Granularity`], its parent (none
//! at the root granularity) and its sequence number among its siblings.
//! Children are not stored; they are asked of the calendar on demand.
//!
//! ```text
//! 2024                    year     (root, parent = None)
//!   └── 2024-03           month    (sequence 3)
//!         └── 2024-03-15  day      (sequence 15)
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::sync::{Arc, Weak};

use crate::calendar::{CalendarRef, same_calendar};
use crate::error::CalendarError;
use crate::granularity::Granularity;
use crate::range::TimeRange;
use crate::relation::Relation;

struct TimeNode {
    calendar: CalendarRef,
    granularity: Granularity,
    parent: Option<TimeObject>,
    sequence: i64,
}

/// A time point or period at some granularity.
///
/// Equality is structural (same calendar instance, granularity, sequence
/// number and parent), with a pointer fast path for interned objects.
#[derive(Clone)]
pub struct TimeObject {
    node: Arc<TimeNode>,
}

impl TimeObject {
    /// Build an object. Calendars call this; application code goes through
    /// [`Calendar::of`](crate::calendar::Calendar::of) or
    /// [`Calendar::next`](crate::calendar::Calendar::next).
    #[must_use]
    pub fn new(
        calendar: CalendarRef,
        granularity: Granularity,
        parent: Option<Self>,
        sequence: i64,
    ) -> Self {
        Self {
            node: Arc::new(TimeNode {
                calendar,
                granularity,
                parent,
                sequence,
            }),
        }
    }

    #[must_use]
    pub fn calendar(&self) -> &CalendarRef {
        &self.node.calendar
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.node.granularity
    }

    /// Position among siblings.
    #[must_use]
    pub fn sequence(&self) -> i64 {
        self.node.sequence
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.node.parent.as_ref()
    }

    /// `self`, then its parent, grandparent and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
        iter::successors(Some(self), |object| object.parent())
    }

    /// The root-granularity ancestor (or `self` at the root).
    #[must_use]
    pub fn root(&self) -> &Self {
        self.ancestors().last().unwrap_or(self)
    }

    /// Number of ancestors; `0` at the root granularity.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Sequence numbers from the root down to `self`.
    #[must_use]
    pub fn path(&self) -> Vec<i64> {
        let mut path: Vec<i64> = self.ancestors().map(Self::sequence).collect();
        path.reverse();
        path
    }

    /// Returns `true` if both handles point at the same node.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// How `self` relates to `other` in time.
    ///
    /// Identical objects are `equal` without consulting the calendar.
    /// Objects from different calendars are `unrelated`.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors met while walking the hierarchy.
    pub fn relation_to(&self, other: &Self) -> Result<Relation, CalendarError> {
        if self.is_same(other) {
            return Ok(Relation::equal());
        }
        self.node.calendar.relate(self, other)
    }

    /// # Errors
    ///
    /// Propagates [`Calendar::children`](crate::calendar::Calendar::children) errors.
    pub fn children(&self) -> Result<Option<TimeRange>, CalendarError> {
        self.node.calendar.children(self)
    }

    /// # Errors
    ///
    /// Propagates [`Calendar::children`](crate::calendar::Calendar::children) errors.
    pub fn first_child(&self) -> Result<Option<Self>, CalendarError> {
        Ok(self.children()?.and_then(|range| range.start().cloned()))
    }

    /// # Errors
    ///
    /// Propagates [`Calendar::children`](crate::calendar::Calendar::children) errors.
    pub fn last_child(&self) -> Result<Option<Self>, CalendarError> {
        Ok(self.children()?.and_then(|range| range.end().cloned()))
    }

    /// The following object at the same granularity.
    ///
    /// # Errors
    ///
    /// Propagates [`Calendar::next`](crate::calendar::Calendar::next) errors.
    pub fn next(&self) -> Result<Option<Self>, CalendarError> {
        self.node.calendar.next(self, 1)
    }

    /// # Errors
    ///
    /// Propagates [`Calendar::serialize`](crate::calendar::Calendar::serialize) errors.
    pub fn serialize(&self) -> Result<String, CalendarError> {
        self.node.calendar.serialize(self)
    }

    pub(crate) fn downgrade(&self) -> WeakTimeObject {
        WeakTimeObject(Arc::downgrade(&self.node))
    }

    fn write_path(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.granularity())?;
        for (i, sequence) in self.path().iter().enumerate() {
            let sep = if i == 0 { ' ' } else { '/' };
            write!(f, "{sep}{sequence}")?;
        }
        Ok(())
    }
}

impl PartialEq for TimeObject {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
            || (self.node.granularity == other.node.granularity
                && self.node.sequence == other.node.sequence
                && same_calendar(&self.node.calendar, &other.node.calendar)
                && self.node.parent == other.node.parent)
    }
}

impl Eq for TimeObject {}

impl Hash for TimeObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.node.calendar).cast::<()>().hash(state);
        self.node.granularity.hash(state);
        self.node.sequence.hash(state);
        self.node.parent.hash(state);
    }
}

impl fmt::Debug for TimeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeObject(")?;
        self.write_path(f)?;
        f.write_str(")")
    }
}

impl fmt::Display for TimeObject {
    /// The calendar's text form, or the raw path if the calendar cannot
    /// serialize.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.serialize() {
            Ok(text) => f.write_str(&text),
            Err(_) => self.write_path(f),
        }
    }
}

/// Non-owning handle used by the [`Interner`](crate::intern::Interner).
#[derive(Clone)]
pub(crate) struct WeakTimeObject(Weak<TimeNode>);

impl WeakTimeObject {
    pub(crate) fn upgrade(&self) -> Option<TimeObject> {
        self.0.upgrade().map(|node| TimeObject { node })
    }

    pub(crate) fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}
