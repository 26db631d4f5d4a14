//! JSON file store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{EngagementRecord, StatsStore, StoreResult};

/// Stores the record as a pretty-printed JSON document at a fixed path.
///
/// Saves write a sibling temp file and rename it over the target so a reader
/// never sees a half-written record.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> StoreResult<Option<EngagementRecord>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stats file yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let record = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "Stats loaded");
        Ok(Some(record))
    }

    fn save(&self, record: &EngagementRecord) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(record)?;
        let temp_path = self.temp_path();

        std::fs::write(&temp_path, data)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), "Stats saved");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        self.path.parent().is_none_or(Path::is_dir)
    }
}
