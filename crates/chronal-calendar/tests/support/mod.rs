#![allow(dead_code)]

use std::sync::{Arc, Once};

use chronal_calendar::UniformCalendar;
use chronal_core::{Calendar, TimeObject};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness; `CHRONAL_LOG` filters.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("CHRONAL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("chronal_calendar=debug,chronal_core=debug,warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// Parse `text` with `cal`, panicking on malformed test input.
pub fn obj(cal: &Arc<UniformCalendar>, text: &str) -> TimeObject {
    cal.of(text)
        .unwrap_or_else(|err| panic!("test input '{text}' must parse: {err}"))
}
