//! Background persister
//!
//! Saves from the engine only replace the latest pending snapshot; a writer
//! task drains it to the underlying store off the tick path. Snapshots that
//! arrive while a write is in flight are coalesced.

use lovethyeyes_store::{EngagementRecord, StatsStore, StoreError, StoreResult};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
enum Pending {
    Idle,
    Write(EngagementRecord),
    Stop,
}

pub struct BackgroundPersister {
    inner: Arc<dyn StatsStore>,
    tx: watch::Sender<Pending>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BackgroundPersister {
    /// Start the writer task. Writes slower than `write_timeout` are reported.
    pub fn spawn(inner: Arc<dyn StatsStore>, write_timeout: Duration) -> Self {
        let (tx, rx) = watch::channel(Pending::Idle);
        let task = tokio::spawn(run_writer(inner.clone(), rx, write_timeout));

        Self {
            inner,
            tx,
            task: Mutex::new(Some(task)),
        }
    }

    /// Stop the writer once the in-flight write (if any) finishes.
    ///
    /// A snapshot still pending at this point is dropped; the caller is
    /// expected to do a final synchronous save.
    pub async fn shutdown(&self) {
        self.tx.send_replace(Pending::Stop);

        let task = self.task.lock().ok().and_then(|mut guard| guard.take());
        if let Some(task) = task
            && let Err(e) = task.await
        {
            error!(error = %e, "Persister task failed");
        }
    }
}

impl StatsStore for BackgroundPersister {
    fn load(&self) -> StoreResult<Option<EngagementRecord>> {
        self.inner.load()
    }

    fn save(&self, record: &EngagementRecord) -> StoreResult<()> {
        if self.tx.is_closed() {
            return Err(StoreError::Unavailable("background persister stopped".into()));
        }
        self.tx.send_replace(Pending::Write(record.clone()));
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        !self.tx.is_closed() && self.inner.is_healthy()
    }
}

async fn run_writer(
    store: Arc<dyn StatsStore>,
    mut rx: watch::Receiver<Pending>,
    write_timeout: Duration,
) {
    while rx.changed().await.is_ok() {
        let pending = rx.borrow_and_update().clone();
        let record = match pending {
            Pending::Idle => continue,
            Pending::Write(record) => record,
            Pending::Stop => break,
        };
        write_one(&store, record, write_timeout).await;
    }

    info!("Persister stopped");
}

async fn write_one(store: &Arc<dyn StatsStore>, record: EngagementRecord, write_timeout: Duration) {
    let store = store.clone();
    let mut write = tokio::task::spawn_blocking(move || store.save(&record));

    let result = match tokio::time::timeout(write_timeout, &mut write).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                timeout_ms = write_timeout.as_millis() as u64,
                "Stats write is slow, still waiting"
            );
            write.await
        }
    };

    match result {
        Ok(Ok(())) => debug!("Engagement record persisted"),
        Ok(Err(e)) => warn!(error = %e, "Failed to persist engagement record"),
        Err(e) => error!(error = %e, "Stats write task failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use lovethyeyes_store::MemoryStore;

    /// Delegates to a memory store after a fixed delay
    struct SlowStore {
        inner: MemoryStore,
        delay: Duration,
    }

    impl StatsStore for SlowStore {
        fn load(&self) -> StoreResult<Option<EngagementRecord>> {
            self.inner.load()
        }

        fn save(&self, record: &EngagementRecord) -> StoreResult<()> {
            std::thread::sleep(self.delay);
            self.inner.save(record)
        }
    }

    fn record(love: u64) -> EngagementRecord {
        let mut record = EngagementRecord::new(Local::now());
        record.love_score = love;
        record
    }

    async fn wait_for(mut condition: impl FnMut() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn save_reaches_inner_store() {
        let inner = Arc::new(MemoryStore::new());
        let persister = BackgroundPersister::spawn(inner.clone(), Duration::from_secs(1));

        persister.save(&record(3)).unwrap();
        wait_for(|| inner.save_count() == 1).await;
        assert_eq!(inner.last_saved().unwrap().love_score, 3);

        persister.shutdown().await;
    }

    #[tokio::test]
    async fn bursts_are_coalesced() {
        let inner = Arc::new(SlowStore {
            inner: MemoryStore::new(),
            delay: Duration::from_millis(100),
        });
        let persister = BackgroundPersister::spawn(inner.clone(), Duration::from_secs(1));

        for love in 1..=5 {
            persister.save(&record(love)).unwrap();
        }
        wait_for(|| inner.inner.last_saved().map(|r| r.love_score) == Some(5)).await;
        assert!(inner.inner.save_count() < 5);

        persister.shutdown().await;
    }

    #[tokio::test]
    async fn slow_write_still_completes() {
        let inner = Arc::new(SlowStore {
            inner: MemoryStore::new(),
            delay: Duration::from_millis(150),
        });
        let persister = BackgroundPersister::spawn(inner.clone(), Duration::from_millis(10));

        persister.save(&record(1)).unwrap();
        wait_for(|| inner.inner.save_count() == 1).await;

        persister.shutdown().await;
    }

    #[tokio::test]
    async fn save_after_shutdown_fails() {
        let inner = Arc::new(MemoryStore::new());
        let persister = BackgroundPersister::spawn(inner, Duration::from_secs(1));
        assert!(persister.is_healthy());

        persister.shutdown().await;
        assert!(!persister.is_healthy());
        assert!(persister.save(&record(1)).is_err());
    }

    #[tokio::test]
    async fn load_reads_inner_store() {
        let inner = Arc::new(MemoryStore::with_record(record(9)));
        let persister = BackgroundPersister::spawn(inner, Duration::from_secs(1));

        assert_eq!(persister.load().unwrap().unwrap().love_score, 9);
        persister.shutdown().await;
    }
}
