//! Store trait definitions

use crate::{EngagementRecord, StoreResult};

/// Whole-record statistics store.
///
/// Saves overwrite the previous record entirely; there are no partial updates.
pub trait StatsStore: Send + Sync {
    /// Load the persisted record. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> StoreResult<Option<EngagementRecord>>;

    /// Replace the persisted record
    fn save(&self, record: &EngagementRecord) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool {
        true
    }
}
