//! chronal-calendar: a configurable reference calendar for chronal.
//!
//! [`UniformCalendar`] gives every level below the root a fixed number of
//! children (twelve months of thirty days in the standard layout). It is
//! regular enough to reason about by hand, which makes it the calendar the
//! multi-level relation tests and benchmarks run against. It does not model
//! real-world month lengths or leap years.
//!
//! ```
//! use chronal_calendar::UniformCalendar;
//! use chronal_core::{Calendar, Relation};
//!
//! let cal = UniformCalendar::standard();
//! let day = cal.of("2024-03-15").unwrap();
//! let year = cal.of("2024").unwrap();
//! assert_eq!(day.relation_to(&year).unwrap(), Relation::inside());
//! ```
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` with context for file loading; typed
//!   errors ([`ConfigError`], [`chronal_core::CalendarError`]) everywhere else.
//! - **Logging**: `tracing` macros (`info!`, `debug!`, `trace!`).

pub mod config;
pub mod uniform;

pub use config::{CalendarConfig, ConfigError, LevelConfig, load_calendar_config};
pub use uniform::UniformCalendar;
