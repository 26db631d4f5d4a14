//! In-memory store for tests and ephemeral runs

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{EngagementRecord, StatsStore, StoreError, StoreResult};

/// Keeps the last saved record in memory and counts saves.
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<EngagementRecord>>,
    saves: AtomicUsize,

    /// Configure saves to fail
    pub fail_saves: AtomicBool,

    /// Configure loads to fail
    pub fail_loads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a record
    pub fn with_record(record: EngagementRecord) -> Self {
        let store = Self::new();
        *store.record.lock().unwrap() = Some(record);
        store
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// The most recently saved record
    pub fn last_saved(&self) -> Option<EngagementRecord> {
        self.record.lock().unwrap().clone()
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<EngagementRecord>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Mock load failure".into()));
        }
        Ok(self.record.lock().unwrap().clone())
    }

    fn save(&self, record: &EngagementRecord) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Mock save failure".into()));
        }
        *self.record.lock().unwrap() = Some(record.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn counts_saves() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let record = EngagementRecord::new(Local::now());
        store.save(&record).unwrap();
        store.save(&record).unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.last_saved(), Some(record));
    }

    #[test]
    fn failing_saves_keep_previous_record() {
        let record = EngagementRecord::new(Local::now());
        let store = MemoryStore::with_record(record.clone());
        store.fail_saves.store(true, Ordering::SeqCst);

        let mut changed = record.clone();
        changed.love_score = 9;
        assert!(store.save(&changed).is_err());
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load().unwrap(), Some(record));
    }
}
