//! Time utilities for lovethyeyes
//!
//! All scheduling is done against wall-clock deltas, so the single source of
//! "now" lives here.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `LOVETHYEYES_MOCK_TIME` environment variable can be set
//! to override the system time. The mock clock starts at the given instant and
//! advances at the real rate.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::sync::OnceLock;
use std::time::Duration;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "LOVETHYEYES_MOCK_TIME";

/// Accepted mock time format
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

/// Parse a mock time string into a local timestamp.
pub fn parse_mock_time(value: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value, MOCK_TIME_FORMAT).ok()?;
    Local.from_local_datetime(&naive).single()
}

fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            let mock_time_str = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
            match parse_mock_time(&mock_time_str) {
                Some(mock_dt) => {
                    let offset = mock_dt.signed_duration_since(Local::now());
                    tracing::info!(
                        mock_time = %mock_time_str,
                        offset_secs = offset.num_seconds(),
                        "Mock time enabled"
                    );
                    Some(offset)
                }
                None => {
                    tracing::warn!(
                        mock_time = %mock_time_str,
                        expected_format = MOCK_TIME_FORMAT,
                        "Invalid mock time, using real clock"
                    );
                    None
                }
            }
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
pub fn now() -> DateTime<Local> {
    let real_now = Local::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Elapsed wall-clock time from `earlier` to `now`, clamped at zero.
///
/// An `earlier` in the future (a snoozed anchor) yields `Duration::ZERO`.
pub fn elapsed_between(earlier: DateTime<Local>, now: DateTime<Local>) -> Duration {
    now.signed_duration_since(earlier)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Longest offset `add_duration` will apply (a century).
const MAX_OFFSET_DAYS: i64 = 36_500;

/// Add a std duration to a timestamp, capping the offset at a century.
pub fn add_duration(at: DateTime<Local>, by: Duration) -> DateTime<Local> {
    let cap = chrono::Duration::days(MAX_OFFSET_DAYS);
    let delta = chrono::Duration::from_std(by)
        .map(|delta| delta.min(cap))
        .unwrap_or(cap);

    at.checked_add_signed(delta).unwrap_or(at)
}

/// Format a duration as hours and minutes: `"2h 5m"`, or `"5m"` under an hour.
pub fn format_hours_minutes(d: Duration) -> String {
    let total_minutes = d.as_secs() / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Render a boolean flag the way the daemon logs it.
pub fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}
