//! Crawler module: collecting pages and applying translations
//!
//! This module contains the core crawl logic, including:
//! - Per-page-load orchestration (collect or apply)
//! - Element collection with concurrent translation requests
//! - Rewriting pages from stored translations
//! - HTTP fetching and the page-load loop

mod applier;
mod arena;
mod collector;
mod driver;
mod fetcher;
mod orchestrator;

pub use applier::{apply, ApplyError, ApplyResult, ApplyWarning};
pub use arena::PageArena;
pub use collector::{collect_page, CollectOutcome, MissingTranslation};
pub use driver::run_crawl;
pub use fetcher::{build_http_client, fetch_page};
pub use orchestrator::{
    CollectedData, InitOutcome, InitRequest, Orchestrator, NOT_APPLIED_MESSAGE,
};
