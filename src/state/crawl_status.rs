/// Crawl status definitions
///
/// A stored aggregate is either still being filled page by page, or finished.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of the crawl that produced a stored aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    /// Pages are still being collected; every page load collects again
    InProgress,

    /// The last configured page was collected; page loads apply translations
    Complete,
}

impl CrawlStatus {
    /// Returns true if the crawl reached its terminal page
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Name of the status as it appears in stored snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
