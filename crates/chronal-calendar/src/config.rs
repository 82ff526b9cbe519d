//! Calendar layouts loaded from TOML.
//!
//! ```toml
//! name = "standard"
//!
//! [[levels]]
//! granularity = "year"
//! width = 4
//!
//! [[levels]]
//! granularity = "month"
//! count = 12
//! ```
//!
//! Levels are listed coarse to fine. The first level is the unbounded root;
//! every level below it has a fixed `count` of children per parent,
//! numbered from `first`.

use std::path::Path;

use anyhow::{Context, Result};
use chronal_core::{ErrorCode, Granularity};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub levels: Vec<LevelConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub granularity: Granularity,
    /// Children per parent. Absent on the root level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Sequence number of the first child.
    #[serde(default = "default_first")]
    pub first: i64,
    /// Text written before this level's number. Ignored on the root level.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Zero-padding width of this level's number.
    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_name() -> String {
    "uniform".to_string()
}

const fn default_first() -> i64 {
    1
}

fn default_separator() -> String {
    "-".to_string()
}

const fn default_width() -> usize {
    2
}

impl LevelConfig {
    /// A root level.
    #[must_use]
    pub fn root(granularity: Granularity, width: usize) -> Self {
        Self {
            granularity,
            count: None,
            first: default_first(),
            separator: String::new(),
            width,
        }
    }

    /// A level of `count` children numbered from `first`.
    #[must_use]
    pub fn nested(
        granularity: Granularity,
        count: i64,
        first: i64,
        separator: &str,
        width: usize,
    ) -> Self {
        Self {
            granularity,
            count: Some(count),
            first,
            separator: separator.to_string(),
            width,
        }
    }

    /// Sequence number of the last child.
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.count.map(|count| self.first + count - 1)
    }
}

/// Validation failures of a [`CalendarConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("calendar '{0}' has no levels")]
    NoLevels(String),
    #[error("root level {0} must not have a count")]
    RootHasCount(Granularity),
    #[error("level {0} needs a count")]
    MissingCount(Granularity),
    #[error("level {granularity} count must be at least 1, got {count}")]
    InvalidCount { granularity: Granularity, count: i64 },
    #[error("level {finer} must be finer than {coarser}")]
    NotFiner {
        coarser: Granularity,
        finer: Granularity,
    },
    #[error("level {0} needs a separator without digits")]
    InvalidSeparator(Granularity),
    #[error("level {granularity} numbers overflow starting at {first}")]
    Overflow { granularity: Granularity, first: i64 },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::InvalidConfig
    }
}

impl CalendarConfig {
    /// Year, 12 months, 30 days, 24 hours, 60 minutes, 60 seconds and 1000
    /// milliseconds, written `2024-03-15T10:30:00.250`.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            levels: vec![
                LevelConfig::root(Granularity::Year, 4),
                LevelConfig::nested(Granularity::Month, 12, 1, "-", 2),
                LevelConfig::nested(Granularity::Day, 30, 1, "-", 2),
                LevelConfig::nested(Granularity::Hour, 24, 0, "T", 2),
                LevelConfig::nested(Granularity::Minute, 60, 0, ":", 2),
                LevelConfig::nested(Granularity::Second, 60, 0, ":", 2),
                LevelConfig::nested(Granularity::Millisecond, 1000, 0, ".", 3),
            ],
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Fails on TOML syntax errors, unknown granularities, or a layout that
    /// [`CalendarConfig::validate`] rejects.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse calendar config")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the layout.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some((root, nested)) = self.levels.split_first() else {
            return Err(ConfigError::NoLevels(self.name.clone()));
        };
        if root.count.is_some() {
            return Err(ConfigError::RootHasCount(root.granularity));
        }

        let mut coarser = root.granularity;
        for level in nested {
            if !level.granularity.is_finer_than(coarser) {
                return Err(ConfigError::NotFiner {
                    coarser,
                    finer: level.granularity,
                });
            }
            let count = level
                .count
                .ok_or(ConfigError::MissingCount(level.granularity))?;
            if count < 1 {
                return Err(ConfigError::InvalidCount {
                    granularity: level.granularity,
                    count,
                });
            }
            if level.first.checked_add(count).is_none() {
                return Err(ConfigError::Overflow {
                    granularity: level.granularity,
                    first: level.first,
                });
            }
            if level.separator.is_empty() || level.separator.chars().any(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidSeparator(level.granularity));
            }
            coarser = level.granularity;
        }
        Ok(())
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Read and validate a calendar layout from `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or does not hold a valid layout.
pub fn load_calendar_config(path: &Path) -> Result<CalendarConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = CalendarConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    info!(
        path = %path.display(),
        name = %config.name,
        levels = config.levels.len(),
        "loaded calendar config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_is_valid() {
        let config = CalendarConfig::standard();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.levels.len(), 7);
        assert_eq!(config.levels[1].last(), Some(12));
        assert_eq!(config.levels[3].last(), Some(23));
        assert_eq!(CalendarConfig::default(), config);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let config = CalendarConfig::from_toml_str(
            r#"
            [[levels]]
            granularity = "year"

            [[levels]]
            granularity = "month"
            count = 12
            "#,
        )
        .expect("valid");
        assert_eq!(config.name, "uniform");
        let month = &config.levels[1];
        assert_eq!(month.first, 1);
        assert_eq!(month.separator, "-");
        assert_eq!(month.width, 2);
    }

    #[test]
    fn rejects_bad_layouts() {
        let mut config = CalendarConfig::standard();
        config.levels.swap(1, 2);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFiner {
                coarser: Granularity::Day,
                finer: Granularity::Month,
            })
        );

        let mut config = CalendarConfig::standard();
        config.levels[0].count = Some(3);
        assert_eq!(
            config.validate(),
            Err(ConfigError::RootHasCount(Granularity::Year))
        );

        let mut config = CalendarConfig::standard();
        config.levels[2].count = None;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingCount(Granularity::Day))
        );

        let mut config = CalendarConfig::standard();
        config.levels[2].count = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCount { count: 0, .. })
        ));

        let mut config = CalendarConfig::standard();
        config.levels[4].separator = "1".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSeparator(Granularity::Minute))
        );

        let empty = CalendarConfig {
            name: "empty".to_string(),
            levels: Vec::new(),
        };
        let err = empty.validate().expect_err("no levels");
        assert_eq!(err.code(), ErrorCode::InvalidConfig);
    }
}
