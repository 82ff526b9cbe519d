use std::sync::Arc;

use chronal_calendar::UniformCalendar;
use chronal_core::TimeObject;
use proptest::prelude::*;

/// A path into the standard calendar, from a year down to any depth.
pub fn arb_path() -> impl Strategy<Value = Vec<i64>> + Clone {
    (
        1990i64..2030,
        1i64..=12,
        1i64..=30,
        0i64..24,
        0i64..60,
        0i64..60,
        0i64..1000,
        1usize..=7,
    )
        .prop_map(|(year, month, day, hour, minute, second, ms, depth)| {
            let mut path = vec![year, month, day, hour, minute, second, ms];
            path.truncate(depth);
            path
        })
}

/// Paths biased towards the edges of their parents, where boundary lifting
/// matters.
pub fn arb_edge_path() -> impl Strategy<Value = Vec<i64>> + Clone {
    (
        2023i64..2026,
        prop_oneof![Just(1i64), Just(12)],
        prop_oneof![Just(1i64), Just(30)],
        prop_oneof![Just(0i64), Just(23)],
        1usize..=4,
    )
        .prop_map(|(year, month, day, hour, depth)| {
            let mut path = vec![year, month, day, hour];
            path.truncate(depth);
            path
        })
}

pub fn object(cal: &Arc<UniformCalendar>, path: &[i64]) -> TimeObject {
    cal.object(path)
        .unwrap_or_else(|err| panic!("generated path {path:?} must be valid: {err}"))
}
