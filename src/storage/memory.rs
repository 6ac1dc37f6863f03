//! In-memory storage implementation
//!
//! Useful for single-process runs and tests; values vanish with the process.

use crate::storage::traits::{Storage, StorageResult};
use std::collections::HashMap;

/// Slot storage backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slot writes performed so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read_slot(&self, name: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(name).cloned())
    }

    fn write_slot(&mut self, name: &str, value: &str) -> StorageResult<()> {
        self.writes += 1;
        self.slots.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn clear_slot(&mut self, name: &str) -> StorageResult<()> {
        self.slots.remove(name);
        Ok(())
    }
}
