//! A fixed-arity calendar.
//!
//! Every level below the root has the same number of children under each
//! parent, so stepping is plain carry arithmetic on the object's path:
//!
//! ```text
//! 2024-12-30  +1 day  ->  index 30 of 30 carries into the month
//!                     ->  2024-12 +1 month carries into the year
//!                     ->  2025-01-01
//! ```
//!
//! Objects are interned by path, so equal objects usually share one node.

use std::sync::{Arc, Weak};

use chronal_core::{
    Calendar, CalendarError, CalendarRef, Interner, TimeObject, TimeRange,
};
use tracing::{debug, trace};

use crate::config::{CalendarConfig, ConfigError, LevelConfig};

#[derive(Debug)]
pub struct UniformCalendar {
    config: CalendarConfig,
    objects: Interner<Vec<i64>>,
    this: Weak<Self>,
}

impl UniformCalendar {
    /// Build a calendar from a layout.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CalendarConfig::validate`].
    pub fn new(config: CalendarConfig) -> Result<Arc<Self>, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The [`CalendarConfig::standard`] layout.
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Self::build(CalendarConfig::standard())
    }

    fn build(config: CalendarConfig) -> Arc<Self> {
        debug!(
            name = %config.name,
            levels = ?config.levels.iter().map(|l| l.granularity).collect::<Vec<_>>(),
            "building uniform calendar"
        );
        Arc::new_cyclic(|this| Self {
            config,
            objects: Interner::new(),
            this: this.clone(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    fn handle(&self) -> Result<CalendarRef, CalendarError> {
        self.this
            .upgrade()
            .map(|this| this as CalendarRef)
            .ok_or_else(|| CalendarError::Released(self.config.name.clone()))
    }

    /// The object at `path`, root sequence number first.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidArgument`] if the path is deeper than the
    /// calendar or a sequence number is out of its level's range.
    pub fn object(&self, path: &[i64]) -> Result<TimeObject, CalendarError> {
        if path.is_empty() || path.len() > self.config.levels.len() {
            return Err(CalendarError::InvalidArgument(format!(
                "path {path:?} must have 1 to {} parts",
                self.config.levels.len()
            )));
        }
        for (level, &sequence) in self.config.levels.iter().zip(path).skip(1) {
            let last = level.last().unwrap_or(i64::MAX);
            if sequence < level.first || sequence > last {
                return Err(CalendarError::InvalidArgument(format!(
                    "{} {sequence} is outside {}..={last}",
                    level.granularity, level.first
                )));
            }
        }
        self.intern(path)
    }

    /// Look up or build the object at an already validated `path`.
    fn intern(&self, path: &[i64]) -> Result<TimeObject, CalendarError> {
        self.objects.intern(path.to_vec(), || {
            let Some((&sequence, parent_path)) = path.split_last() else {
                return Err(CalendarError::InvalidArgument("empty path".to_string()));
            };
            let parent = if parent_path.is_empty() {
                None
            } else {
                Some(self.intern(parent_path)?)
            };
            let granularity = self.config.levels[parent_path.len()].granularity;
            Ok(TimeObject::new(self.handle()?, granularity, parent, sequence))
        })
    }

    fn ensure_owned(&self, object: &TimeObject) -> Result<(), CalendarError> {
        if self.contains(object) {
            Ok(())
        } else {
            Err(CalendarError::InvalidArgument(format!(
                "{object:?} does not belong to calendar '{}'",
                self.config.name
            )))
        }
    }

    fn level(&self, depth: usize) -> Result<&LevelConfig, CalendarError> {
        self.config.levels.get(depth).ok_or_else(|| {
            CalendarError::InvalidArgument(format!(
                "depth {depth} is below the finest level of '{}'",
                self.config.name
            ))
        })
    }

    /// Path `quantity` steps from `path` at the same level, or `None` when
    /// the root numbers overflow.
    fn step(&self, path: &[i64], quantity: i64) -> Result<Option<Vec<i64>>, CalendarError> {
        let Some((&sequence, parent_path)) = path.split_last() else {
            return Ok(None);
        };
        if parent_path.is_empty() {
            return Ok(sequence.checked_add(quantity).map(|root| vec![root]));
        }

        let level = self.level(parent_path.len())?;
        let count = level.count.unwrap_or(1);
        let Some(index) = (sequence - level.first).checked_add(quantity) else {
            return Ok(None);
        };
        let carry = index.div_euclid(count);
        let sequence = level.first + index.rem_euclid(count);

        let parent = if carry == 0 {
            Some(parent_path.to_vec())
        } else {
            self.step(parent_path, carry)?
        };
        Ok(parent.map(|mut path| {
            path.push(sequence);
            path
        }))
    }

    fn parse_path(&self, raw: &str) -> Result<Vec<i64>, CalendarError> {
        let invalid = |why: &str| CalendarError::InvalidArgument(format!("'{raw}': {why}"));

        let (root, mut rest) = take_number(raw.trim()).ok_or_else(|| invalid("no number"))?;
        let mut path = vec![root];
        for level in self.config.levels.iter().skip(1) {
            if rest.is_empty() {
                break;
            }
            let after = rest
                .strip_prefix(level.separator.as_str())
                .ok_or_else(|| invalid(&format!("expected '{}'", level.separator)))?;
            let (sequence, tail) = take_number(after).ok_or_else(|| invalid("no number"))?;
            path.push(sequence);
            rest = tail;
        }
        if rest.is_empty() {
            Ok(path)
        } else {
            Err(invalid(&format!("unexpected '{rest}'")))
        }
    }
}

/// Split an optionally negative decimal number off the front of `text`.
fn take_number(text: &str) -> Option<(i64, &str)> {
    let sign = usize::from(text.starts_with('-'));
    let digits = text[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - sign);
    if digits == 0 {
        return None;
    }
    let (number, rest) = text.split_at(sign + digits);
    number.parse().ok().map(|n| (n, rest))
}

fn pad(sequence: i64, width: usize) -> String {
    if sequence < 0 {
        format!("-{:0width$}", sequence.unsigned_abs())
    } else {
        format!("{sequence:0width$}")
    }
}

impl Calendar for UniformCalendar {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn next(&self, object: &TimeObject, quantity: i64) -> Result<Option<TimeObject>, CalendarError> {
        self.ensure_owned(object)?;
        if quantity == 0 {
            return Ok(Some(object.clone()));
        }
        let path = object.path();
        let next = self.step(&path, quantity)?;
        trace!(?path, quantity, ?next, "stepped");
        next.map(|path| self.intern(&path)).transpose()
    }

    fn children(&self, object: &TimeObject) -> Result<Option<TimeRange>, CalendarError> {
        self.ensure_owned(object)?;
        let Some(level) = self.config.levels.get(object.depth() + 1) else {
            return Ok(None);
        };
        let (Some(last), mut path) = (level.last(), object.path()) else {
            return Ok(None);
        };
        path.push(level.first);
        let first_child = self.intern(&path)?;
        path.pop();
        path.push(last);
        let last_child = self.intern(&path)?;

        TimeRange::between(first_child, last_child)
            .map(Some)
            .map_err(|err| CalendarError::InvalidArgument(err.to_string()))
    }

    fn of(&self, raw: &str) -> Result<TimeObject, CalendarError> {
        let path = self.parse_path(raw)?;
        self.object(&path)
    }

    fn serialize(&self, object: &TimeObject) -> Result<String, CalendarError> {
        self.ensure_owned(object)?;
        let mut text = String::new();
        for (depth, sequence) in object.path().into_iter().enumerate() {
            let level = self.level(depth)?;
            if depth > 0 {
                text.push_str(&level.separator);
            }
            text.push_str(&pad(sequence, level.width));
        }
        Ok(text)
    }
}
