//! Persistence layer for lovethyeyes
//!
//! Provides:
//! - The persisted engagement record schema
//! - A store trait with whole-record load/save
//! - A JSON file store (the on-disk format) and an in-memory store

mod file;
mod memory;
mod record;
mod traits;

pub use file::*;
pub use memory::*;
pub use record::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
