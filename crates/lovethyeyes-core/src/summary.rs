//! Stats summary templates

use lovethyeyes_util::format_hours_minutes;
use std::fmt;
use std::time::Duration;

use crate::{CareLevel, Relationship, compute_ratio};

/// Usage above which the 20-20-20 tip is offered to infrequent break takers
const HEAVY_USAGE: Duration = Duration::from_secs(4 * 60 * 60);

/// Breaks taken below which the 20-20-20 tip is offered
const FEW_BREAKS: u64 = 5;

const REGULAR_BREAKS_TIP: &str =
    "Tip: Taking regular breaks improves productivity and prevents eye strain!";
const TWENTY_TWENTY_TIP: &str =
    "Tip: For every 20 minutes, look at something 20 feet away for 20 seconds.";

/// Which summary template to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatTemplate {
    LoveHatredRatio,
    BreaksEmbraced,
    ScreenTimeCheck,
    TimeSinceLastBreak,
    CareLevel,
    BreakTally,
    WorkingTime,
    RelationshipStatus,
}

impl StatTemplate {
    pub const ALL: [StatTemplate; 8] = [
        StatTemplate::LoveHatredRatio,
        StatTemplate::BreaksEmbraced,
        StatTemplate::ScreenTimeCheck,
        StatTemplate::TimeSinceLastBreak,
        StatTemplate::CareLevel,
        StatTemplate::BreakTally,
        StatTemplate::WorkingTime,
        StatTemplate::RelationshipStatus,
    ];
}

/// Inputs to a stats summary, captured at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub love: u64,
    pub hatred: u64,
    pub breaks_taken: u64,
    pub breaks_skipped: u64,
    /// Time since the session started
    pub usage: Duration,
    /// Time since the last short break fired or was snoozed to
    pub since_last_break: Duration,
}

impl StatsSnapshot {
    pub fn ratio(&self) -> f64 {
        compute_ratio(self.love, self.hatred)
    }
}

/// A summary template with its arguments bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatMessage {
    LoveHatredRatio { love: u64, hatred: u64 },
    BreaksEmbraced { taken: u64, skipped: u64 },
    ScreenTimeCheck { usage: Duration },
    TimeSinceLastBreak { love: u64, hatred: u64, since: Duration },
    CareLevel { level: CareLevel, love: u64, hatred: u64 },
    BreakTally { taken: u64, skipped: u64 },
    WorkingTime { usage: Duration, love: u64 },
    RelationshipStatus { status: Relationship, love: u64, hatred: u64 },
}

impl StatMessage {
    pub fn compose(template: StatTemplate, stats: &StatsSnapshot) -> Self {
        let (love, hatred) = (stats.love, stats.hatred);
        match template {
            StatTemplate::LoveHatredRatio => StatMessage::LoveHatredRatio { love, hatred },
            StatTemplate::BreaksEmbraced => StatMessage::BreaksEmbraced {
                taken: stats.breaks_taken,
                skipped: stats.breaks_skipped,
            },
            StatTemplate::ScreenTimeCheck => StatMessage::ScreenTimeCheck { usage: stats.usage },
            StatTemplate::TimeSinceLastBreak => StatMessage::TimeSinceLastBreak {
                love,
                hatred,
                since: stats.since_last_break,
            },
            StatTemplate::CareLevel => StatMessage::CareLevel {
                level: CareLevel::classify(stats.ratio()),
                love,
                hatred,
            },
            StatTemplate::BreakTally => StatMessage::BreakTally {
                taken: stats.breaks_taken,
                skipped: stats.breaks_skipped,
            },
            StatTemplate::WorkingTime => StatMessage::WorkingTime {
                usage: stats.usage,
                love,
            },
            StatTemplate::RelationshipStatus => StatMessage::RelationshipStatus {
                status: Relationship::classify(stats.ratio()),
                love,
                hatred,
            },
        }
    }
}

impl fmt::Display for StatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatMessage::LoveHatredRatio { love, hatred } => write!(
                f,
                "Your Eye Love-Hatred ratio is currently {}:{}. How do you feel about that?",
                love, hatred
            ),
            StatMessage::BreaksEmbraced { taken, skipped } => write!(
                f,
                "Eye Care Stats: {} breaks embraced, {} breaks ignored. Your eyes remember!",
                taken, skipped
            ),
            StatMessage::ScreenTimeCheck { usage } => write!(
                f,
                "Screen Time Check: You've been using your computer for {} today. Remember to hydrate!",
                format_hours_minutes(*usage)
            ),
            StatMessage::TimeSinceLastBreak {
                love,
                hatred,
                since,
            } => write!(
                f,
                "Eye Love: {} | Eye Hatred: {} | Time since last break: {}",
                love,
                hatred,
                format_hours_minutes(*since)
            ),
            StatMessage::CareLevel {
                level,
                love,
                hatred,
            } => write!(
                f,
                "Eye Care Level: {}. Based on your {}/{} love-hate ratio.",
                level, love, hatred
            ),
            StatMessage::BreakTally { taken, skipped } => write!(
                f,
                "You've taken {} breaks and skipped {}. Each break matters to your eye health!",
                taken, skipped
            ),
            StatMessage::WorkingTime { usage, love } => write!(
                f,
                "Your eyes have been working for {} today. They've earned {} points of care.",
                format_hours_minutes(*usage),
                love
            ),
            StatMessage::RelationshipStatus {
                status,
                love,
                hatred,
            } => write!(
                f,
                "Screen relationship status: {} (based on your {}:{} care ratio)",
                status, love, hatred
            ),
        }
    }
}

/// Advice appended to a summary, if any applies
pub fn summary_tip(stats: &StatsSnapshot) -> Option<&'static str> {
    if stats.ratio() < 1.0 {
        Some(REGULAR_BREAKS_TIP)
    } else if stats.usage > HEAVY_USAGE && stats.breaks_taken < FEW_BREAKS {
        Some(TWENTY_TWENTY_TIP)
    } else {
        None
    }
}

/// Full summary body: the rendered template, then the tip after a blank line
pub fn render_summary(template: StatTemplate, stats: &StatsSnapshot) -> String {
    let mut body = StatMessage::compose(template, stats).to_string();
    if let Some(tip) = summary_tip(stats) {
        body.push_str("\n\n");
        body.push_str(tip);
    }
    body
}
