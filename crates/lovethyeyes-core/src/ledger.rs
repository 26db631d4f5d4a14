//! Engagement ledger: love/hatred scores and break counts

use chrono::{DateTime, Local};
use lovethyeyes_store::EngagementRecord;
use tracing::info;

/// Bonus love points for accepting a logout
pub const LOGOUT_BONUS: u64 = 5;

/// Holds the engagement record and applies score changes.
///
/// Callers persist after every mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementLedger {
    record: EngagementRecord,
}

impl EngagementLedger {
    pub fn new(record: EngagementRecord) -> Self {
        Self { record }
    }

    /// A ledger with zeroed counters and `session_start = now`
    pub fn fresh(now: DateTime<Local>) -> Self {
        Self::new(EngagementRecord::new(now))
    }

    pub fn record(&self) -> &EngagementRecord {
        &self.record
    }

    pub(crate) fn record_mut(&mut self) -> &mut EngagementRecord {
        &mut self.record
    }

    /// Long breaks are worth double
    pub fn record_break_taken(&mut self, is_long: bool) {
        let points = if is_long { 2 } else { 1 };
        self.record.breaks_taken += 1;
        self.record.love_score += points;

        info!(
            is_long,
            love_score = self.record.love_score,
            breaks_taken = self.record.breaks_taken,
            "Break taken"
        );
    }

    pub fn record_break_skipped(&mut self) {
        self.record.breaks_skipped += 1;
        self.record.hatred_score += 1;

        info!(
            hatred_score = self.record.hatred_score,
            breaks_skipped = self.record.breaks_skipped,
            "Break skipped"
        );
    }

    pub fn record_logout(&mut self) {
        self.record.love_score += LOGOUT_BONUS;
        info!(love_score = self.record.love_score, "Logout accepted");
    }

    pub fn acknowledge_stats(&mut self) {
        self.record.love_score += 1;
        info!(love_score = self.record.love_score, "Stats acknowledged");
    }

    /// `love / hatred`, or `love` itself when there is no hatred yet
    pub fn ratio(&self) -> f64 {
        compute_ratio(self.record.love_score, self.record.hatred_score)
    }

    pub fn care_level(&self) -> CareLevel {
        CareLevel::classify(self.ratio())
    }

    pub fn relationship(&self) -> Relationship {
        Relationship::classify(self.ratio())
    }
}

pub fn compute_ratio(love: u64, hatred: u64) -> f64 {
    if hatred > 0 {
        love as f64 / hatred as f64
    } else {
        love as f64
    }
}

/// Qualitative care level derived from the love/hatred ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareLevel {
    Champion,
    Friendly,
    Neutral,
    StrainRisk,
    Beginner,
}

impl CareLevel {
    pub fn classify(ratio: f64) -> Self {
        if ratio >= 3.0 {
            CareLevel::Champion
        } else if ratio >= 2.0 {
            CareLevel::Friendly
        } else if ratio >= 1.0 {
            CareLevel::Neutral
        } else if ratio > 0.0 {
            CareLevel::StrainRisk
        } else {
            CareLevel::Beginner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CareLevel::Champion => "Eye Care Champion",
            CareLevel::Friendly => "Eye Friendly User",
            CareLevel::Neutral => "Eye Neutral User",
            CareLevel::StrainRisk => "Eye Strain Risk",
            CareLevel::Beginner => "Eye Care Beginner",
        }
    }
}

impl std::fmt::Display for CareLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Screen "relationship status" derived from the love/hatred ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    InLove,
    Healthy,
    Complicated,
    AddictionAlert,
}

impl Relationship {
    pub fn classify(ratio: f64) -> Self {
        if ratio >= 4.0 {
            Relationship::InLove
        } else if ratio >= 2.0 {
            Relationship::Healthy
        } else if ratio >= 1.0 {
            Relationship::Complicated
        } else {
            Relationship::AddictionAlert
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Relationship::InLove => "In love with healthy eyes",
            Relationship::Healthy => "In a healthy relationship with your screen",
            Relationship::Complicated => "It's complicated with your screen",
            Relationship::AddictionAlert => "Screen addiction alert",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ledger() -> EngagementLedger {
        EngagementLedger::fresh(Local.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn short_break_is_worth_one() {
        let mut ledger = ledger();
        ledger.record_break_taken(false);
        assert_eq!(ledger.record().love_score, 1);
        assert_eq!(ledger.record().breaks_taken, 1);
    }

    #[test]
    fn long_break_is_worth_two() {
        let mut ledger = ledger();
        ledger.record_break_taken(true);
        assert_eq!(ledger.record().love_score, 2);
        assert_eq!(ledger.record().breaks_taken, 1);
    }

    #[test]
    fn skip_never_touches_love() {
        let mut ledger = ledger();
        ledger.record_break_taken(false);
        ledger.record_break_skipped();
        assert_eq!(ledger.record().love_score, 1);
        assert_eq!(ledger.record().hatred_score, 1);
        assert_eq!(ledger.record().breaks_skipped, 1);
        assert_eq!(ledger.record().breaks_taken, 1);
    }

    #[test]
    fn logout_and_acknowledge_bonuses() {
        let mut ledger = ledger();
        ledger.record_logout();
        assert_eq!(ledger.record().love_score, 5);
        ledger.acknowledge_stats();
        assert_eq!(ledger.record().love_score, 6);
        assert_eq!(ledger.record().breaks_taken, 0);
    }

    #[test]
    fn ratio_with_zero_hatred_is_love() {
        for love in [0, 1, 7, 1000] {
            assert_eq!(compute_ratio(love, 0), love as f64);
        }
    }

    #[test]
    fn ratio_divides_exactly() {
        assert_eq!(compute_ratio(6, 4), 1.5);
        assert_eq!(compute_ratio(0, 3), 0.0);
        assert_eq!(compute_ratio(9, 3), 3.0);
    }

    #[test]
    fn care_level_boundaries_are_inclusive() {
        assert_eq!(CareLevel::classify(3.0), CareLevel::Champion);
        assert_eq!(CareLevel::classify(2.999), CareLevel::Friendly);
        assert_eq!(CareLevel::classify(2.0), CareLevel::Friendly);
        assert_eq!(CareLevel::classify(1.0), CareLevel::Neutral);
        assert_eq!(CareLevel::classify(0.5), CareLevel::StrainRisk);
        assert_eq!(CareLevel::classify(0.0), CareLevel::Beginner);
    }

    #[test]
    fn relationship_boundaries_are_inclusive() {
        assert_eq!(Relationship::classify(4.0), Relationship::InLove);
        assert_eq!(Relationship::classify(3.9), Relationship::Healthy);
        assert_eq!(Relationship::classify(2.0), Relationship::Healthy);
        assert_eq!(Relationship::classify(1.0), Relationship::Complicated);
        assert_eq!(Relationship::classify(0.99), Relationship::AddictionAlert);
        assert_eq!(Relationship::classify(0.0), Relationship::AddictionAlert);
    }

    #[test]
    fn classification_is_total() {
        // Every ratio reachable from small counters maps to some label
        for love in 0..20u64 {
            for hatred in 0..20u64 {
                let ratio = compute_ratio(love, hatred);
                assert!(!CareLevel::classify(ratio).label().is_empty());
                assert!(!Relationship::classify(ratio).label().is_empty());
            }
        }
    }

    #[test]
    fn ledger_classifies_its_own_ratio() {
        let mut ledger = ledger();
        assert_eq!(ledger.care_level(), CareLevel::Beginner);
        ledger.record_break_taken(true);
        ledger.record_break_taken(true);
        assert_eq!(ledger.care_level(), CareLevel::Champion);
        assert_eq!(ledger.relationship(), Relationship::InLove);
        ledger.record_break_skipped();
        assert_eq!(ledger.ratio(), 4.0);
    }
}
