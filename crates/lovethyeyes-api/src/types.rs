//! Prompt kinds and user actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which break a prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    Short,
    Long,
}

impl BreakKind {
    pub fn is_long(self) -> bool {
        matches!(self, BreakKind::Long)
    }
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakKind::Short => write!(f, "short"),
            BreakKind::Long => write!(f, "long"),
        }
    }
}

/// What a dispatched prompt is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromptKind {
    Break { kind: BreakKind },
    Stats,
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::Break { kind } => write!(f, "{} break", kind),
            PromptKind::Stats => write!(f, "stats"),
        }
    }
}

/// A user response to a prompt.
///
/// Actions travel from the notification boundary back to the core as plain
/// values; the core applies them sequentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    /// The user took the break
    TakeBreak { kind: BreakKind },

    /// The user skipped or ignored the break
    SkipBreak { kind: BreakKind },

    /// Defer the short-break cadence
    Snooze { duration: Duration },

    /// End the desktop session now
    Logout,

    /// The user thanked us for the stats summary
    AcknowledgeStats,
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::TakeBreak { kind } => write!(f, "took {} break", kind),
            UserAction::SkipBreak { kind } => write!(f, "skipped {} break", kind),
            UserAction::Snooze { duration } => write!(f, "snoozed {}s", duration.as_secs()),
            UserAction::Logout => write!(f, "logout"),
            UserAction::AcknowledgeStats => write!(f, "acknowledged stats"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_kind_is_long() {
        assert!(BreakKind::Long.is_long());
        assert!(!BreakKind::Short.is_long());
    }

    #[test]
    fn user_action_serialization() {
        let action = UserAction::TakeBreak {
            kind: BreakKind::Long,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("take_break"));
        assert!(json.contains("long"));

        let parsed: UserAction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn prompt_kind_display() {
        let prompt = PromptKind::Break {
            kind: BreakKind::Short,
        };
        assert_eq!(prompt.to_string(), "short break");
        assert_eq!(PromptKind::Stats.to_string(), "stats");
    }
}
