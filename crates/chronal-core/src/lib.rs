//! chronal-core: interval relations between hierarchical time objects.
//!
//! The core never does calendar arithmetic. It models
//!
//! - [`Relation`]: the 16 ways two intervals can sit relative to each
//!   other, as a pair of [`RelationCode`]s (where the left edge falls,
//!   where the right edge falls),
//! - [`TimeObject`]: a node in a calendar's granularity tree,
//! - [`Calendar`]: the capability that knows how to step, nest and print
//!   objects,
//! - [`TimeRange`]: a lazily iterated stretch of objects.
//!
//! Relations between objects at different granularities are resolved by
//! [`hierarchy`], which only asks the calendar for `next` and `children`.
//!
//! # Conventions
//!
//! - **Errors**: every fallible operation returns a module error enum from
//!   [`error`]; each maps to a stable [`ErrorCode`].
//! - **Logging**: `tracing` macros only. `debug!` for decisions worth
//!   explaining (unrelated pairs, pruning), `trace!` for per-step detail.

pub mod calendar;
pub mod error;
pub mod granularity;
pub mod hierarchy;
pub mod intern;
pub mod object;
pub mod range;
pub mod relation;

pub use calendar::{Calendar, CalendarRef, same_calendar};
pub use error::{CalendarError, ErrorCode, RangeError, RelationError};
pub use granularity::Granularity;
pub use intern::Interner;
pub use object::TimeObject;
pub use range::{RangeIter, TimeRange};
pub use relation::{Relation, RelationCode};
