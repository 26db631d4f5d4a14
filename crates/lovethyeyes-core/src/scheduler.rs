//! Break scheduler
//!
//! Three independent timers are checked against wall-clock deltas on every
//! tick, always in the order short break, long break, stats. A timer that
//! fires re-arms from the firing tick's timestamp, so any backlog from a
//! suspended process collapses into a single firing.

use chrono::{DateTime, Local};
use lovethyeyes_config::Intervals;
use lovethyeyes_util::{add_duration, elapsed_between};
use std::time::Duration;
use tracing::{debug, info};

/// The scheduler's timers, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    ShortBreak,
    LongBreak,
    Stats,
}

/// In-memory scheduling anchors. Never persisted.
#[derive(Debug, Clone)]
pub struct BreakScheduler {
    intervals: Intervals,
    last_short_break: DateTime<Local>,
    last_long_break: DateTime<Local>,
}

impl BreakScheduler {
    /// Both break timers start counting at `now`
    pub fn new(intervals: Intervals, now: DateTime<Local>) -> Self {
        Self {
            intervals,
            last_short_break: now,
            last_long_break: now,
        }
    }

    pub fn intervals(&self) -> &Intervals {
        &self.intervals
    }

    pub fn last_short_break(&self) -> DateTime<Local> {
        self.last_short_break
    }

    pub fn last_long_break(&self) -> DateTime<Local> {
        self.last_long_break
    }

    /// Evaluate all timers at `now`, re-arming those that fire.
    ///
    /// The stats anchor lives in the persisted record, so it is passed in.
    pub fn poll(&mut self, now: DateTime<Local>, stats_anchor: &mut DateTime<Local>) -> Vec<Timer> {
        let mut fired = Vec::new();

        if is_due(self.last_short_break, self.intervals.short_break, now) {
            self.last_short_break = now;
            fired.push(Timer::ShortBreak);
        }

        if is_due(self.last_long_break, self.intervals.long_break, now) {
            self.last_long_break = now;
            fired.push(Timer::LongBreak);
        }

        if is_due(*stats_anchor, self.intervals.stats, now) {
            *stats_anchor = now;
            fired.push(Timer::Stats);
        }

        if !fired.is_empty() {
            debug!(?fired, "Timers fired");
        }

        fired
    }

    /// Defer the short-break timer: its anchor moves to `now + duration`.
    /// The long-break timer is untouched.
    pub fn snooze(&mut self, now: DateTime<Local>, duration: Duration) {
        self.last_short_break = add_duration(now, duration);
        info!(
            snooze_secs = duration.as_secs(),
            until = %self.last_short_break,
            "Short break snoozed"
        );
    }

    /// Time since the short-break anchor, zero while snoozed
    pub fn since_last_short_break(&self, now: DateTime<Local>) -> Duration {
        elapsed_between(self.last_short_break, now)
    }
}

fn is_due(anchor: DateTime<Local>, interval: Duration, now: DateTime<Local>) -> bool {
    elapsed_between(anchor, now) >= interval
}
