//! Storage module for persisting collected translations
//!
//! State survives between page loads only through a named slot in a
//! key-value store. This module provides:
//! - The `Storage` trait (read, replace, clear a slot)
//! - A SQLite backend for real crawls
//! - An in-memory backend

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::LingoError;

use std::path::Path;

/// Name of the slot holding the aggregate
pub const AGGREGATE_SLOT: &str = "gTranslationData";

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(LingoError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, LingoError> {
    SqliteStorage::new(path)
}
