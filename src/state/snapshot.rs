//! The value kept in the persistent aggregate slot
//!
//! Besides the page records, a snapshot remembers which crawl produced it
//! (`session`) and whether that crawl finished (`status`). Both decide, on the
//! next page load, whether stored progress may be extended or must be dropped.

use crate::model::{Aggregate, PageRecord};
use crate::state::CrawlStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Aggregate plus the crawl bookkeeping needed across page loads
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AggregateSnapshot {
    pub version: u32,

    /// Fingerprint of the configuration that started the crawl
    pub session: String,

    pub status: CrawlStatus,

    pub updated_at: DateTime<Utc>,

    pub pages: Aggregate,
}

impl AggregateSnapshot {
    /// Starts an empty, in-progress snapshot for a session
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            session: session.into(),
            status: CrawlStatus::InProgress,
            updated_at: Utc::now(),
            pages: Aggregate::new(),
        }
    }

    /// Wraps an aggregate produced elsewhere as finished data
    pub fn complete(session: impl Into<String>, pages: Aggregate) -> Self {
        Self {
            status: CrawlStatus::Complete,
            pages,
            ..Self::new(session)
        }
    }

    /// Returns true if apply mode can use this snapshot
    pub fn is_ready(&self) -> bool {
        self.status.is_complete() && !self.pages.is_empty()
    }

    /// Returns true if a page load with `session` may keep adding to this snapshot
    pub fn can_resume(&self, session: &str) -> bool {
        !self.status.is_complete() && self.session == session
    }

    /// Stores a page record, replacing an earlier record for the same path
    pub fn record_page(&mut self, record: PageRecord) -> bool {
        self.updated_at = Utc::now();
        self.pages.upsert(record)
    }

    pub fn mark_complete(&mut self) {
        self.status = CrawlStatus::Complete;
        self.updated_at = Utc::now();
    }
}

/// Accepted layouts of the stored slot value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Snapshot(AggregateSnapshot),
    Bare(Vec<PageRecord>),
}

/// Decodes a stored slot value
///
/// A bare array of page records is read as finished data with no session.
pub fn decode_snapshot(value: &str) -> serde_json::Result<AggregateSnapshot> {
    Ok(match serde_json::from_str(value)? {
        StoredValue::Snapshot(snapshot) => snapshot,
        StoredValue::Bare(pages) => AggregateSnapshot::complete("", Aggregate::from(pages)),
    })
}

/// Encodes a snapshot for the slot
pub fn encode_snapshot(snapshot: &AggregateSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}
