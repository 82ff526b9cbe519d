//! Calendar doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once, Weak};

use chronal_core::{Calendar, CalendarError, CalendarRef, Granularity, TimeObject, TimeRange};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness; `CHRONAL_LOG` filters.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("CHRONAL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("chronal_core=debug,warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// A calendar where every non-root object has the same number of children.
///
/// Levels are listed coarse to fine. The root level is unbounded in both
/// directions; every other level numbers its children `1..=count`.
#[derive(Debug)]
pub struct GridCalendar {
    name: String,
    levels: Vec<(Granularity, i64)>,
    this: Weak<Self>,
}

impl GridCalendar {
    /// `levels[0]` is the root; its count is ignored.
    pub fn new(name: &str, levels: &[(Granularity, i64)]) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            name: name.to_string(),
            levels: levels.to_vec(),
            this: this.clone(),
        })
    }

    /// Years, twelve months of thirty days each.
    pub fn years_months_days(name: &str) -> Arc<Self> {
        Self::new(
            name,
            &[
                (Granularity::Year, 0),
                (Granularity::Month, 12),
                (Granularity::Day, 30),
            ],
        )
    }

    fn handle(&self) -> CalendarRef {
        let this: Arc<Self> = self.this.upgrade().expect("calendar alive while in use");
        this
    }

    /// Build the object at `path`, root sequence first.
    pub fn at(&self, path: &[i64]) -> TimeObject {
        assert!(!path.is_empty() && path.len() <= self.levels.len(), "bad path {path:?}");
        let mut object: Option<TimeObject> = None;
        for (depth, sequence) in path.iter().enumerate() {
            object = Some(TimeObject::new(
                self.handle(),
                self.levels[depth].0,
                object,
                *sequence,
            ));
        }
        object.expect("non-empty path")
    }

    fn level_of(&self, object: &TimeObject) -> usize {
        object.depth()
    }
}

impl Calendar for GridCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn next(&self, object: &TimeObject, quantity: i64) -> Result<Option<TimeObject>, CalendarError> {
        let Some(parent) = object.parent() else {
            return Ok(object
                .sequence()
                .checked_add(quantity)
                .map(|sequence| self.at(&[sequence])));
        };
        let count = self.levels[self.level_of(object)].1;
        let index = object.sequence() - 1 + quantity;
        let carry = index.div_euclid(count);
        let sequence = index.rem_euclid(count) + 1;
        let parent = if carry == 0 {
            Some(parent.clone())
        } else {
            self.next(parent, carry)?
        };
        Ok(parent.map(|parent| {
            TimeObject::new(self.handle(), object.granularity(), Some(parent), sequence)
        }))
    }

    fn children(&self, object: &TimeObject) -> Result<Option<TimeRange>, CalendarError> {
        let depth = self.level_of(object) + 1;
        let Some(&(granularity, count)) = self.levels.get(depth) else {
            return Ok(None);
        };
        let child = |sequence| {
            TimeObject::new(self.handle(), granularity, Some(object.clone()), sequence)
        };
        TimeRange::between(child(1), child(count))
            .map(Some)
            .map_err(|err| CalendarError::InvalidArgument(err.to_string()))
    }

    fn of(&self, raw: &str) -> Result<TimeObject, CalendarError> {
        let path = raw
            .split('/')
            .map(str::parse::<i64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| CalendarError::InvalidArgument(format!("'{raw}': {err}")))?;
        if path.is_empty() || path.len() > self.levels.len() {
            return Err(CalendarError::InvalidArgument(format!("'{raw}': bad depth")));
        }
        Ok(self.at(&path))
    }

    fn serialize(&self, object: &TimeObject) -> Result<String, CalendarError> {
        Ok(object
            .path()
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join("/"))
    }
}

/// A calendar that can only parse root objects; everything else is left to
/// the trait defaults.
#[derive(Debug)]
pub struct StubCalendar {
    this: Weak<Self>,
}

impl StubCalendar {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Self { this: this.clone() })
    }
}

impl Calendar for StubCalendar {
    fn name(&self) -> &str {
        "stub"
    }

    fn of(&self, raw: &str) -> Result<TimeObject, CalendarError> {
        let sequence = raw
            .parse::<i64>()
            .map_err(|err| CalendarError::InvalidArgument(format!("'{raw}': {err}")))?;
        let this: Arc<Self> = self
            .this
            .upgrade()
            .ok_or_else(|| CalendarError::Released("stub".to_string()))?;
        Ok(TimeObject::new(this, Granularity::Year, None, sequence))
    }
}
