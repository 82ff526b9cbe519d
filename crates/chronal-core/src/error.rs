//! Error taxonomy for chronal.
//!
//! Three families are kept apart so callers can tell a programming mistake
//! from a calendar that simply has not implemented something yet:
//!
//! - [`RelationError`]: a relation was built from out-of-domain or
//!   out-of-order codes, or a name/diagram could not be parsed.
//! - [`CalendarError`]: a calendar operation is missing, or its input could
//!   not be understood.
//! - [`RangeError`]: a range was assembled from incompatible endpoints or
//!   iterated with a bad step.
//!
//! Comparing objects that have nothing in common is **not** an error; it
//! resolves to [`Relation::unrelated`](crate::relation::Relation::unrelated).
//!
//! Every variant maps to a stable [`ErrorCode`].

use std::fmt;

use crate::granularity::Granularity;
use crate::relation::RelationCode;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidRelationCode,
    RelationOutOfOrder,
    UnknownRelation,
    NotImplemented,
    InvalidArgument,
    CalendarReleased,
    CalendarMismatch,
    GranularityMismatch,
    InvalidStep,
    InvalidConfig,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidRelationCode => "E1001",
            Self::RelationOutOfOrder => "E1002",
            Self::UnknownRelation => "E1003",
            Self::NotImplemented => "E2001",
            Self::InvalidArgument => "E2002",
            Self::CalendarReleased => "E2003",
            Self::CalendarMismatch => "E3001",
            Self::GranularityMismatch => "E3002",
            Self::InvalidStep => "E3003",
            Self::InvalidConfig => "E4001",
        }
    }

    /// Short human-facing summary.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidRelationCode => "Relation code out of range",
            Self::RelationOutOfOrder => "Relation sides out of order",
            Self::UnknownRelation => "Unknown relation",
            Self::NotImplemented => "Calendar operation not implemented",
            Self::InvalidArgument => "Invalid calendar input",
            Self::CalendarReleased => "Calendar no longer alive",
            Self::CalendarMismatch => "Range endpoints from different calendars",
            Self::GranularityMismatch => "Range endpoints at different granularities",
            Self::InvalidStep => "Invalid iteration step",
            Self::InvalidConfig => "Invalid calendar configuration",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidRelationCode => Some("Use one of the six codes 0..=5."),
            Self::RelationOutOfOrder => {
                Some("The left side must not be classified further right than the right side.")
            }
            Self::UnknownRelation => {
                Some("Use a canonical name such as `left_adjoining` or a 9-character diagram.")
            }
            Self::NotImplemented => {
                Some("Implement the operation on the calendar before relying on it.")
            }
            Self::InvalidArgument => None,
            Self::CalendarReleased => Some("Keep the calendar alive while its objects are in use."),
            Self::CalendarMismatch => Some("Build both endpoints from the same calendar instance."),
            Self::GranularityMismatch => Some("Use endpoints at the same granularity."),
            Self::InvalidStep => Some("Iterate with a step of at least 1."),
            Self::InvalidConfig => {
                Some("List levels coarse to fine; every level below the root needs a count.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors from building or parsing a [`Relation`](crate::relation::Relation).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    /// A raw code is outside `0..=5`.
    #[error("{side} relation code must be one of 0..=5, got {value}")]
    InvalidCode { side: &'static str, value: u8 },
    /// The left side is classified further right than the right side.
    #[error("left relation {left} must be less than or equal to right relation {right}")]
    OutOfOrder {
        left: RelationCode,
        right: RelationCode,
    },
    /// Text that is neither a canonical relation name nor a known diagram.
    #[error("unknown relation: '{0}'")]
    Unknown(String),
}

impl RelationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCode { .. } => ErrorCode::InvalidRelationCode,
            Self::OutOfOrder { .. } => ErrorCode::RelationOutOfOrder,
            Self::Unknown(_) => ErrorCode::UnknownRelation,
        }
    }
}

/// Errors raised by [`Calendar`](crate::calendar::Calendar) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The calendar has not implemented this operation.
    #[error("method {calendar}::{operation} not implemented yet")]
    NotImplemented {
        calendar: String,
        operation: &'static str,
    },
    /// Input the calendar cannot interpret (unparsable text, out-of-range
    /// sequence number, an object from another calendar).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The calendar that owns an object has already been dropped.
    #[error("calendar '{0}' is no longer alive")]
    Released(String),
}

impl CalendarError {
    /// Shorthand for [`CalendarError::NotImplemented`].
    #[must_use]
    pub fn not_implemented(calendar: &str, operation: &'static str) -> Self {
        Self::NotImplemented {
            calendar: calendar.to_string(),
            operation,
        }
    }

    /// Returns `true` for [`CalendarError::NotImplemented`].
    #[must_use]
    pub const fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotImplemented { .. } => ErrorCode::NotImplemented,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Released(_) => ErrorCode::CalendarReleased,
        }
    }
}

/// Errors from building or iterating a [`TimeRange`](crate::range::TimeRange).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("range endpoints belong to different calendars")]
    CalendarMismatch,
    #[error("range endpoints have different granularities: {start} and {end}")]
    GranularityMismatch { start: Granularity, end: Granularity },
    #[error("iteration step must be at least 1, got {0}")]
    InvalidStep(i64),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl RangeError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CalendarMismatch => ErrorCode::CalendarMismatch,
            Self::GranularityMismatch { .. } => ErrorCode::GranularityMismatch,
            Self::InvalidStep(_) => ErrorCode::InvalidStep,
            Self::Calendar(e) => e.code(),
        }
    }
}
