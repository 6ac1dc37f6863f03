//! Storage traits and error types
//!
//! This module defines the trait interface for slot storage backends and
//! associated error types.

use crate::state::{decode_snapshot, encode_snapshot, AggregateSnapshot};
use crate::storage::AGGREGATE_SLOT;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt value in slot '{slot}': {message}")]
    Corrupt { slot: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A persistent key-value store of named slots
///
/// Values survive process restarts and never expire; a slot disappears only
/// when it is cleared.
pub trait Storage {
    /// Reads a slot, `None` if it was never written or has been cleared
    fn read_slot(&self, name: &str) -> StorageResult<Option<String>>;

    /// Replaces the whole value of a slot
    fn write_slot(&mut self, name: &str, value: &str) -> StorageResult<()>;

    /// Removes a slot
    fn clear_slot(&mut self, name: &str) -> StorageResult<()>;

    // ===== Aggregate Slot =====

    /// Loads the aggregate snapshot
    fn load_snapshot(&self) -> StorageResult<Option<AggregateSnapshot>> {
        match self.read_slot(AGGREGATE_SLOT)? {
            Some(value) => decode_snapshot(&value)
                .map(Some)
                .map_err(|e| StorageError::Corrupt {
                    slot: AGGREGATE_SLOT.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Replaces the aggregate snapshot
    fn save_snapshot(&mut self, snapshot: &AggregateSnapshot) -> StorageResult<()> {
        let value = encode_snapshot(snapshot)?;
        self.write_slot(AGGREGATE_SLOT, &value)
    }

    /// Drops the aggregate snapshot
    fn clear_snapshot(&mut self) -> StorageResult<()> {
        self.clear_slot(AGGREGATE_SLOT)
    }
}
