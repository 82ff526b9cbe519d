//! Granularity tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A level of the time hierarchy.
///
/// Variants are ordered from coarsest to finest, so `a < b` reads as
/// "`a` is coarser than `b`". A calendar picks the subset it uses; the core
/// never assumes which.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Millennium,
    Century,
    Decade,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Granularity {
    /// Every granularity, coarsest first.
    pub const ALL: [Self; 10] = [
        Self::Millennium,
        Self::Century,
        Self::Decade,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Millennium => "millennium",
            Self::Century => "century",
            Self::Decade => "decade",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    /// Returns `true` if `self` is a strictly finer level than `other`.
    #[must_use]
    pub fn is_finer_than(self, other: Self) -> bool {
        self > other
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == wanted)
            .ok_or_else(|| CalendarError::InvalidArgument(format!("unknown granularity '{s}'")))
    }
}
