//! Time ranges and their lazy iteration.
//!
//! A [`TimeRange`] spans from a start object to an end object of the same
//! calendar and granularity, either of which may be absent (unbounded).
//! Iteration asks the calendar for `next` one element at a time and stops
//! the first time an element ends after the range's end.

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::calendar::{CalendarRef, same_calendar};
use crate::error::{CalendarError, RangeError};
use crate::granularity::Granularity;
use crate::hierarchy::{self, Boundary, Span};
use crate::object::TimeObject;
use crate::relation::Relation;

/// A bounded or unbounded stretch of objects at one granularity.
#[derive(Clone)]
pub struct TimeRange {
    calendar: CalendarRef,
    start: Option<TimeObject>,
    end: Option<TimeObject>,
}

impl TimeRange {
    /// The range `[start, end]`.
    ///
    /// A `start` after `end` is accepted and iterates as empty.
    ///
    /// # Errors
    ///
    /// [`RangeError::CalendarMismatch`] if the endpoints come from different
    /// calendars, [`RangeError::GranularityMismatch`] if their
    /// granularities differ.
    pub fn between(start: TimeObject, end: TimeObject) -> Result<Self, RangeError> {
        if !same_calendar(start.calendar(), end.calendar()) {
            return Err(RangeError::CalendarMismatch);
        }
        if start.granularity() != end.granularity() {
            return Err(RangeError::GranularityMismatch {
                start: start.granularity(),
                end: end.granularity(),
            });
        }
        Ok(Self {
            calendar: start.calendar().clone(),
            start: Some(start),
            end: Some(end),
        })
    }

    /// The range from `start` onwards, without an end.
    #[must_use]
    pub fn starting_at(start: TimeObject) -> Self {
        Self {
            calendar: start.calendar().clone(),
            start: Some(start),
            end: None,
        }
    }

    /// The range up to and including `end`, without a start.
    #[must_use]
    pub fn ending_at(end: TimeObject) -> Self {
        Self {
            calendar: end.calendar().clone(),
            start: None,
            end: Some(end),
        }
    }

    /// All of `calendar`'s time.
    #[must_use]
    pub const fn unbounded(calendar: CalendarRef) -> Self {
        Self {
            calendar,
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub const fn calendar(&self) -> &CalendarRef {
        &self.calendar
    }

    #[must_use]
    pub const fn start(&self) -> Option<&TimeObject> {
        self.start.as_ref()
    }

    #[must_use]
    pub const fn end(&self) -> Option<&TimeObject> {
        self.end.as_ref()
    }

    /// Granularity of the endpoints; `None` for a fully unbounded range.
    #[must_use]
    pub fn granularity(&self) -> Option<Granularity> {
        self.endpoint().map(TimeObject::granularity)
    }

    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    fn endpoint(&self) -> Option<&TimeObject> {
        self.start.as_ref().or(self.end.as_ref())
    }

    /// Lazily walk the range one step at a time.
    ///
    /// Without a start the sequence is empty; without an end it never
    /// finishes on its own, so bound it with [`Iterator::take`] or similar.
    /// The range itself is untouched and can be iterated again.
    #[must_use]
    pub fn iterate(&self) -> RangeIter {
        RangeIter {
            current: self.start.clone(),
            end: self.end.clone(),
            step: 1,
            pending: None,
        }
    }

    /// Like [`TimeRange::iterate`], advancing `step` objects at a time.
    ///
    /// # Errors
    ///
    /// [`RangeError::InvalidStep`] if `step < 1`.
    pub fn iterate_by(&self, step: i64) -> Result<RangeIter, RangeError> {
        if step < 1 {
            return Err(RangeError::InvalidStep(step));
        }
        Ok(RangeIter {
            step,
            ..self.iterate()
        })
    }

    /// The covered span, with missing endpoints at infinity. `None` when the
    /// start lies after the end.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors.
    pub fn span(&self) -> Result<Option<Span>, CalendarError> {
        let start = match &self.start {
            Some(start) => hierarchy::start_boundary(start)?,
            None => Boundary::NegativeInfinity,
        };
        let end = match &self.end {
            Some(end) => hierarchy::end_boundary(end)?,
            None => Boundary::PositiveInfinity,
        };
        Ok(Span::try_new(start, end))
    }

    fn shares_hierarchy_with(&self, object: &TimeObject) -> bool {
        self.endpoint().map_or_else(
            || same_calendar(&self.calendar, object.calendar()),
            |endpoint| hierarchy::comparable(endpoint, object),
        )
    }

    /// How this range relates to `object`.
    ///
    /// An empty (inverted) range, or one from another calendar, is
    /// `unrelated` to everything.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors.
    pub fn relation_to(&self, object: &TimeObject) -> Result<Relation, CalendarError> {
        if !self.shares_hierarchy_with(object) {
            debug!(?object, "range and object share no hierarchy; unrelated");
            return Ok(Relation::unrelated());
        }
        let Some(span) = self.span()? else {
            return Ok(Relation::unrelated());
        };
        Ok(span.relate(&hierarchy::span_of(object)?))
    }

    /// How this range relates to another range.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors.
    pub fn relation_to_range(&self, other: &Self) -> Result<Relation, CalendarError> {
        let comparable = other.endpoint().map_or_else(
            || same_calendar(&self.calendar, &other.calendar),
            |endpoint| self.shares_hierarchy_with(endpoint),
        );
        if !comparable {
            return Ok(Relation::unrelated());
        }
        match (self.span()?, other.span()?) {
            (Some(a), Some(b)) => Ok(a.relate(&b)),
            _ => Ok(Relation::unrelated()),
        }
    }

    /// Returns `true` if the range covers all of `object`.
    ///
    /// # Errors
    ///
    /// Propagates calendar errors.
    pub fn contains(&self, object: &TimeObject) -> Result<bool, CalendarError> {
        Ok(self.relation_to(object)?.contains())
    }
}

impl fmt::Debug for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeRange")
            .field("calendar", &self.calendar.name())
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

/// Single-pass iterator over a [`TimeRange`].
///
/// Yields `Err` once and then stops if the calendar fails.
pub struct RangeIter {
    current: Option<TimeObject>,
    end: Option<TimeObject>,
    step: i64,
    pending: Option<CalendarError>,
}

impl Iterator for RangeIter {
    type Item = Result<TimeObject, CalendarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }
        let current = self.current.take()?;

        if let Some(end) = &self.end {
            match current.relation_to(end) {
                Ok(relation) if relation.is_to_right() => {
                    trace!(?current, ?end, "range iteration passed its end");
                    return None;
                }
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }
        }

        match current.calendar().next(&current, self.step) {
            Ok(next) => self.current = next,
            Err(err) => self.pending = Some(err),
        }
        trace!(?current, "range step");
        Some(Ok(current))
    }
}

impl FusedIterator for RangeIter {}

impl fmt::Debug for RangeIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeIter")
            .field("current", &self.current)
            .field("end", &self.end)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}
