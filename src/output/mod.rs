//! Output module for exporting and summarizing collected translations
//!
//! This module handles:
//! - Exporting the aggregate as JSON
//! - Importing JSON back into storage as finished data
//! - Summary statistics

mod json;
pub mod stats;

pub use json::{export_json, import_json, read_json};
pub use stats::{print_statistics, AggregateStatistics};

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid translation data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
