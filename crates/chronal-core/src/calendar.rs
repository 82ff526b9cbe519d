//! The calendar capability.
//!
//! A [`Calendar`] is the only place that knows granularity arithmetic: how
//! to step from one object to the next, which children an object has, and
//! how objects are written as text. The core asks, it never computes.
//!
//! # Contract for implementors
//!
//! - Sibling sequence numbers increase with time.
//! - An object's children tile it without gaps: the first child starts
//!   where the parent starts, and stepping past the last child with
//!   [`Calendar::next`] lands on the first child of the parent's successor.
//! - Every operation a calendar does not support must return
//!   [`CalendarError::NotImplemented`]. The provided defaults do exactly
//!   that, so a half-built calendar fails loudly instead of answering
//!   plausibly.

use std::fmt;
use std::sync::Arc;

use crate::error::CalendarError;
use crate::hierarchy;
use crate::object::TimeObject;
use crate::range::TimeRange;
use crate::relation::Relation;

/// Shared handle to a calendar.
pub type CalendarRef = Arc<dyn Calendar>;

/// Granularity-specific authority over a family of [`TimeObject`]s.
pub trait Calendar: fmt::Debug + Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns `true` if `object` was produced by this calendar instance.
    fn contains(&self, object: &TimeObject) -> bool {
        std::ptr::addr_eq(std::ptr::from_ref(self), Arc::as_ptr(object.calendar()))
    }

    /// Classify `a` against `b`.
    ///
    /// The default resolves the relation through the object hierarchy; see
    /// [`hierarchy::relate`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Calendar::next`] and
    /// [`Calendar::children`], which the hierarchy walk relies on.
    fn relate(&self, a: &TimeObject, b: &TimeObject) -> Result<Relation, CalendarError> {
        hierarchy::relate(a, b)
    }

    /// The object `quantity` steps after `object` at the same granularity,
    /// or `None` past the end of the calendar. Negative quantities step
    /// backwards.
    ///
    /// # Errors
    ///
    /// [`CalendarError::NotImplemented`] unless overridden.
    fn next(&self, object: &TimeObject, quantity: i64) -> Result<Option<TimeObject>, CalendarError> {
        let _ = (object, quantity);
        Err(CalendarError::not_implemented(self.name(), "next"))
    }

    /// The children of `object`, or `None` at the finest granularity.
    ///
    /// # Errors
    ///
    /// [`CalendarError::NotImplemented`] unless overridden.
    fn children(&self, object: &TimeObject) -> Result<Option<TimeRange>, CalendarError> {
        let _ = object;
        Err(CalendarError::not_implemented(self.name(), "children"))
    }

    /// The parent of `object`, or `None` at the root granularity.
    ///
    /// # Errors
    ///
    /// The default reads the parent the object was built with and never
    /// fails.
    fn parent(&self, object: &TimeObject) -> Result<Option<TimeObject>, CalendarError> {
        Ok(object.parent().cloned())
    }

    /// Parse `raw` into an object of this calendar.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidArgument`] for text the calendar cannot
    /// parse; [`CalendarError::NotImplemented`] unless overridden.
    fn of(&self, raw: &str) -> Result<TimeObject, CalendarError> {
        let _ = raw;
        Err(CalendarError::not_implemented(self.name(), "of"))
    }

    /// Write `object` as text that [`Calendar::of`] accepts.
    ///
    /// # Errors
    ///
    /// [`CalendarError::NotImplemented`] unless overridden.
    fn serialize(&self, object: &TimeObject) -> Result<String, CalendarError> {
        let _ = object;
        Err(CalendarError::not_implemented(self.name(), "serialize"))
    }
}

/// Returns `true` if both handles point at the same calendar instance.
#[must_use]
pub fn same_calendar(a: &CalendarRef, b: &CalendarRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
