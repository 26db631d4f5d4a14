//! The persisted engagement record

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Engagement counters and timestamps, persisted as a whole.
///
/// Counters only grow; `session_start` is set once when the record is first
/// created. Older stats files used the `eye_*`/`start_time` field names, which
/// are still accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRecord {
    #[serde(alias = "eye_love_score")]
    pub love_score: u64,

    #[serde(alias = "eye_hatred_score")]
    pub hatred_score: u64,

    pub breaks_taken: u64,

    pub breaks_skipped: u64,

    #[serde(alias = "start_time")]
    pub session_start: DateTime<Local>,

    #[serde(alias = "last_stat_show")]
    pub last_stats_shown: DateTime<Local>,

    #[serde(alias = "total_usage_time")]
    pub last_persisted: DateTime<Local>,
}

impl EngagementRecord {
    /// A fresh record with zeroed counters
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            love_score: 0,
            hatred_score: 0,
            breaks_taken: 0,
            breaks_skipped: 0,
            session_start: now,
            last_stats_shown: now,
            last_persisted: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_record_is_zeroed() {
        let now = Local.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let record = EngagementRecord::new(now);
        assert_eq!(record.love_score, 0);
        assert_eq!(record.hatred_score, 0);
        assert_eq!(record.breaks_taken, 0);
        assert_eq!(record.breaks_skipped, 0);
        assert_eq!(record.session_start, now);
        assert_eq!(record.last_stats_shown, now);
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let json = r#"{
            "eye_love_score": 12,
            "eye_hatred_score": 3,
            "breaks_taken": 9,
            "breaks_skipped": 3,
            "total_usage_time": "2025-03-01T10:00:00+00:00",
            "start_time": "2025-03-01T08:00:00+00:00",
            "last_stat_show": "2025-03-01T09:30:00+00:00"
        }"#;

        let record: EngagementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.love_score, 12);
        assert_eq!(record.hatred_score, 3);
        assert!(record.session_start < record.last_stats_shown);
        assert!(record.last_stats_shown < record.last_persisted);
    }
}
