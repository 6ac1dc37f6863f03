//! State carried between page loads
//!
//! # Components
//!
//! - `CrawlStatus`: whether the stored crawl is still collecting or finished
//! - `AggregateSnapshot`: the versioned value kept in the persistent slot

mod crawl_status;
mod snapshot;

// Re-export main types
pub use crawl_status::CrawlStatus;
pub use snapshot::{decode_snapshot, encode_snapshot, AggregateSnapshot, SNAPSHOT_VERSION};
