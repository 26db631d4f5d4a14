//! Core break engine

use chrono::{DateTime, Local};
use lovethyeyes_api::{BreakKind, UserAction};
use lovethyeyes_config::{NotificationSettings, Settings, SnoozeSettings};
use lovethyeyes_store::{EngagementRecord, StatsStore, StoreResult};
use lovethyeyes_util::{elapsed_between, on_off};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    BreakScheduler, CoreEvent, EngagementLedger, MessageCatalog, PromptStyle, StatsSnapshot,
    Timer, long_break_prompt, render_summary, short_break_prompt, stats_prompt,
};

/// The break engine: one scheduler, one ledger, one store.
///
/// All mutation goes through `tick` and `apply_action`, which the caller
/// serializes. Every mutation of the ledger is persisted before returning.
pub struct CoreEngine {
    catalog: MessageCatalog,
    ledger: EngagementLedger,
    scheduler: BreakScheduler,
    notification_settings: NotificationSettings,
    snooze: SnoozeSettings,
    notifications_enabled: bool,
    audio_enabled: bool,
    store: Arc<dyn StatsStore>,
    rng: StdRng,
}

impl CoreEngine {
    /// Create an engine, resuming the persisted record if there is one
    pub fn new(
        settings: &Settings,
        catalog: MessageCatalog,
        store: Arc<dyn StatsStore>,
        now: DateTime<Local>,
    ) -> Self {
        let record = match store.load() {
            Ok(Some(record)) => {
                info!(
                    love_score = record.love_score,
                    hatred_score = record.hatred_score,
                    breaks_taken = record.breaks_taken,
                    breaks_skipped = record.breaks_skipped,
                    session_start = %record.session_start,
                    "Resumed engagement record"
                );
                record
            }
            Ok(None) => {
                info!("No engagement record yet, starting fresh");
                EngagementRecord::new(now)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load engagement record, starting fresh");
                EngagementRecord::new(now)
            }
        };

        info!(
            short_break_secs = settings.intervals.short_break.as_secs(),
            long_break_secs = settings.intervals.long_break.as_secs(),
            stats_secs = settings.intervals.stats.as_secs(),
            notifications = on_off(settings.notifications.enabled),
            audio = on_off(settings.notifications.audio),
            "Core engine initialized"
        );

        Self {
            catalog,
            ledger: EngagementLedger::new(record),
            scheduler: BreakScheduler::new(settings.intervals, now),
            notification_settings: settings.notifications.clone(),
            snooze: settings.snooze,
            notifications_enabled: settings.notifications.enabled,
            audio_enabled: settings.notifications.audio,
            store,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source (message and template choice)
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Evaluate all timers, then persist the record unconditionally
    pub fn tick(&mut self, now: DateTime<Local>) -> Vec<CoreEvent> {
        let fired = self
            .scheduler
            .poll(now, &mut self.ledger.record_mut().last_stats_shown);

        let mut events = Vec::new();
        for timer in fired {
            if let Some(event) = self.on_timer(timer, now) {
                events.push(event);
            }
        }

        self.persist(now);
        events
    }

    fn on_timer(&mut self, timer: Timer, now: DateTime<Local>) -> Option<CoreEvent> {
        if !self.notifications_enabled {
            debug!(?timer, "Notifications disabled, prompt suppressed");
            return None;
        }

        let style = PromptStyle {
            notifications: &self.notification_settings,
            snooze: &self.snooze,
            audio: self.audio_enabled,
        };

        match timer {
            Timer::ShortBreak => {
                let body = self.catalog.short_break_message(&mut self.rng);
                info!(message = %body, "Short break triggered");
                Some(CoreEvent::BreakDue {
                    kind: BreakKind::Short,
                    request: short_break_prompt(style, body),
                })
            }
            Timer::LongBreak => {
                let body = self.catalog.long_break_message(&mut self.rng);
                info!(message = %body, "Long break triggered");
                Some(CoreEvent::BreakDue {
                    kind: BreakKind::Long,
                    request: long_break_prompt(style, body),
                })
            }
            Timer::Stats => {
                let template = self.catalog.pick_stat_template(&mut self.rng);
                let body = render_summary(template, &self.stats_snapshot(now));
                info!(?template, "Showing stats");
                Some(CoreEvent::StatsDue {
                    request: stats_prompt(style, body),
                })
            }
        }
    }

    /// Apply a user response. Ledger changes are persisted immediately.
    pub fn apply_action(&mut self, action: UserAction, now: DateTime<Local>) -> Vec<CoreEvent> {
        debug!(%action, "Applying user action");

        match action {
            UserAction::TakeBreak { kind } => {
                self.ledger.record_break_taken(kind.is_long());
                self.persist(now);
                Vec::new()
            }
            UserAction::SkipBreak { .. } => {
                self.ledger.record_break_skipped();
                self.persist(now);
                Vec::new()
            }
            UserAction::Snooze { duration } => {
                self.scheduler.snooze(now, duration);
                Vec::new()
            }
            UserAction::Logout => {
                self.ledger.record_logout();
                self.persist(now);
                vec![CoreEvent::SessionTerminationRequested]
            }
            UserAction::AcknowledgeStats => {
                self.ledger.acknowledge_stats();
                self.persist(now);
                Vec::new()
            }
        }
    }

    /// Stamp `last_persisted` and write the whole record. Failures are
    /// logged; the in-memory record is kept either way.
    pub fn persist(&mut self, now: DateTime<Local>) {
        let store = self.store.clone();
        if let Err(e) = self.persist_to(store.as_ref(), now) {
            warn!(error = %e, "Failed to persist engagement record");
        }
    }

    /// Stamp `last_persisted` and write the record to a specific store
    pub fn persist_to(&mut self, store: &dyn StatsStore, now: DateTime<Local>) -> StoreResult<()> {
        self.ledger.record_mut().last_persisted = now;
        store.save(self.ledger.record())
    }

    /// Flip the notifications flag, returning the new state
    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications_enabled = !self.notifications_enabled;
        info!(
            "Notifications turned {}",
            on_off(self.notifications_enabled)
        );
        self.notifications_enabled
    }

    /// Flip the audio flag, returning the new state
    pub fn toggle_audio(&mut self) -> bool {
        self.audio_enabled = !self.audio_enabled;
        info!("Audio alerts turned {}", on_off(self.audio_enabled));
        self.audio_enabled
    }

    pub fn stats_snapshot(&self, now: DateTime<Local>) -> StatsSnapshot {
        let record = self.ledger.record();
        StatsSnapshot {
            love: record.love_score,
            hatred: record.hatred_score,
            breaks_taken: record.breaks_taken,
            breaks_skipped: record.breaks_skipped,
            usage: elapsed_between(record.session_start, now),
            since_last_break: self.scheduler.since_last_short_break(now),
        }
    }

    pub fn record(&self) -> &EngagementRecord {
        self.ledger.record()
    }

    pub fn ledger(&self) -> &EngagementLedger {
        &self.ledger
    }

    pub fn scheduler(&self) -> &BreakScheduler {
        &self.scheduler
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lovethyeyes_api::PromptKind;
    use lovethyeyes_config::Intervals;
    use lovethyeyes_store::{JsonFileStore, MemoryStore};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn at(secs: i64) -> DateTime<Local> {
        t0() + chrono::Duration::seconds(secs)
    }

    fn settings(short: u64, long: u64, stats: u64) -> Settings {
        let mut settings = Settings::default();
        settings.intervals = Intervals {
            short_break: Duration::from_secs(short),
            long_break: Duration::from_secs(long),
            stats: Duration::from_secs(stats),
            tick: Duration::from_secs(1),
        };
        settings
    }

    fn make_engine(settings: &Settings, store: Arc<MemoryStore>) -> CoreEngine {
        CoreEngine::new(settings, MessageCatalog::default(), store, t0())
            .with_rng(StdRng::seed_from_u64(1))
    }

    #[test]
    fn tick_persists_even_when_nothing_fires() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        for secs in 1..=5 {
            assert!(engine.tick(at(secs)).is_empty());
        }
        assert_eq!(store.save_count(), 5);
        assert_eq!(store.last_saved().unwrap().last_persisted, at(5));
    }

    #[test]
    fn seven_second_short_break() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store);

        let mut fired = Vec::new();
        for secs in 0..=10 {
            for event in engine.tick(at(secs)) {
                if let CoreEvent::BreakDue { kind, .. } = event {
                    fired.push((secs, kind));
                }
            }
        }

        assert_eq!(fired, vec![(7, BreakKind::Short)]);
        assert_eq!(engine.scheduler().last_short_break(), at(7));
    }

    #[test]
    fn both_breaks_fire_in_one_tick() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(10, 10, 100), store);

        let events = engine.tick(at(10));
        let kinds: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                CoreEvent::BreakDue { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![BreakKind::Short, BreakKind::Long]);
    }

    #[test]
    fn stats_fire_and_update_anchor() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(100, 100, 5), store.clone());

        let events = engine.tick(at(5));
        assert_eq!(events.len(), 1);
        let request = events[0].request().unwrap();
        assert_eq!(request.prompt, PromptKind::Stats);
        assert_eq!(request.title, "Eye Care Stats");
        assert_eq!(engine.record().last_stats_shown, at(5));
        assert_eq!(store.last_saved().unwrap().last_stats_shown, at(5));
    }

    #[test]
    fn take_break_scores_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        engine.apply_action(
            UserAction::TakeBreak {
                kind: BreakKind::Long,
            },
            at(1),
        );
        assert_eq!(store.save_count(), 1);
        let saved = store.last_saved().unwrap();
        assert_eq!(saved.love_score, 2);
        assert_eq!(saved.breaks_taken, 1);
    }

    #[test]
    fn skip_scores_hatred() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        engine.apply_action(
            UserAction::SkipBreak {
                kind: BreakKind::Short,
            },
            at(1),
        );
        let saved = store.last_saved().unwrap();
        assert_eq!(saved.hatred_score, 1);
        assert_eq!(saved.breaks_skipped, 1);
        assert_eq!(saved.love_score, 0);
    }

    #[test]
    fn logout_persists_before_requesting_termination() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        let events = engine.apply_action(UserAction::Logout, at(1));
        assert_eq!(events, vec![CoreEvent::SessionTerminationRequested]);
        assert_eq!(store.last_saved().unwrap().love_score, 5);
    }

    #[test]
    fn acknowledge_stats_adds_love() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        engine.apply_action(UserAction::AcknowledgeStats, at(1));
        assert_eq!(store.last_saved().unwrap().love_score, 1);
    }

    #[test]
    fn snooze_defers_short_break() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        engine.apply_action(
            UserAction::Snooze {
                duration: Duration::from_secs(10),
            },
            at(2),
        );
        // Snooze does not touch the ledger
        assert_eq!(store.save_count(), 0);
        assert_eq!(engine.scheduler().last_short_break(), at(12));

        assert!(engine.tick(at(18)).is_empty());
        assert_eq!(engine.tick(at(19)).len(), 1);
    }

    #[test]
    fn disabled_notifications_still_rearm() {
        let mut settings = settings(5, 100, 100);
        settings.notifications.enabled = false;
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings, store);

        assert!(engine.tick(at(5)).is_empty());
        assert_eq!(engine.scheduler().last_short_break(), at(5));

        assert!(engine.toggle_notifications());
        assert!(engine.tick(at(9)).is_empty());
        assert_eq!(engine.tick(at(10)).len(), 1);
    }

    #[test]
    fn toggle_audio_controls_sound() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(5, 100, 100), store);

        assert!(!engine.toggle_audio());
        let events = engine.tick(at(5));
        assert_eq!(events[0].request().unwrap().sound, None);
        assert!(engine.toggle_audio());
    }

    #[test]
    fn save_failure_keeps_in_memory_state() {
        let store = Arc::new(MemoryStore::new());
        store.fail_saves.store(true, Ordering::SeqCst);
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());

        engine.apply_action(
            UserAction::TakeBreak {
                kind: BreakKind::Short,
            },
            at(1),
        );
        engine.tick(at(2));

        assert_eq!(engine.record().love_score, 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn load_failure_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.fail_loads.store(true, Ordering::SeqCst);
        let engine = make_engine(&settings(7, 100, 100), store);

        assert_eq!(engine.record(), &EngagementRecord::new(t0()));
    }

    #[test]
    fn resumes_existing_record() {
        let mut record = EngagementRecord::new(t0() - chrono::Duration::days(3));
        record.love_score = 12;
        record.hatred_score = 4;
        let store = Arc::new(MemoryStore::with_record(record.clone()));

        let mut engine = make_engine(&settings(7, 100, 100), store);
        assert_eq!(engine.record().session_start, record.session_start);

        engine.apply_action(UserAction::AcknowledgeStats, at(1));
        assert_eq!(engine.record().love_score, 13);
        assert_eq!(engine.record().session_start, record.session_start);
    }

    #[test]
    fn file_store_round_trip_advances_last_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("lovethyeyes.json")));

        let mut engine = CoreEngine::new(
            &settings(7, 100, 100),
            MessageCatalog::default(),
            store.clone(),
            t0(),
        );
        engine.apply_action(
            UserAction::TakeBreak {
                kind: BreakKind::Short,
            },
            at(1),
        );
        engine.apply_action(
            UserAction::SkipBreak {
                kind: BreakKind::Long,
            },
            at(2),
        );
        let before = engine.record().clone();

        let mut reloaded = CoreEngine::new(
            &settings(7, 100, 100),
            MessageCatalog::default(),
            store,
            at(10),
        );
        assert_eq!(reloaded.record(), &before);

        reloaded.persist(at(11));
        let after = reloaded.record();
        assert_eq!(after.love_score, before.love_score);
        assert_eq!(after.hatred_score, before.hatred_score);
        assert_eq!(after.session_start, before.session_start);
        assert!(after.last_persisted > before.last_persisted);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let run = || {
            let store = Arc::new(MemoryStore::new());
            let mut engine = make_engine(&settings(1, 100, 100), store);
            (1..=20)
                .flat_map(|secs| engine.tick(at(secs)))
                .filter_map(|e| e.request().map(|r| r.body.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn stats_snapshot_reflects_session() {
        let store = Arc::new(MemoryStore::new());
        let engine = make_engine(&settings(7, 100, 100), store);

        let snapshot = engine.stats_snapshot(at(3600 + 120));
        assert_eq!(snapshot.usage, Duration::from_secs(3720));
        assert_eq!(snapshot.since_last_break, Duration::from_secs(3720));
    }

    #[test]
    fn persist_to_other_store_stamps_record() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = make_engine(&settings(7, 100, 100), store.clone());
        let other = MemoryStore::new();

        engine.persist_to(&other, at(30)).unwrap();
        assert_eq!(other.last_saved().unwrap().last_persisted, at(30));
        assert_eq!(engine.record().last_persisted, at(30));
        assert_eq!(store.save_count(), 0);
    }
}
