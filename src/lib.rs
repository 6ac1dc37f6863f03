//! Site-Lingo: a multi-page translation harvester
//!
//! This crate walks a configured list of pages on one site, collects the
//! translatable fragments marked on each page, optionally machine-translates
//! them into a set of target languages, and keeps the aggregate in a single
//! persistent slot. Once an aggregate exists, any page can be rewritten into a
//! chosen language without collecting again.

pub mod config;
pub mod crawler;
pub mod gateway;
pub mod model;
pub mod output;
pub mod page;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Lingo operations
#[derive(Debug, Error)]
pub enum LingoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Translation gateway error: {0}")]
    Gateway(#[from] gateway::GatewayError),

    #[error("Page error: {0}")]
    Page(#[from] page::PageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Navigation to {url} leaves the configured site")]
    OffSite { url: String },

    #[error("Crawl did not finish after {loads} page loads")]
    NavigationLimit { loads: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid element selector: {0}")]
    InvalidSelector(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site-Lingo operations
pub type Result<T> = std::result::Result<T, LingoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, InitOutcome, InitRequest, Orchestrator};
pub use model::{Aggregate, ElementRecord, LanguageSpec, PageRecord, TranslationEntry};
pub use state::{AggregateSnapshot, CrawlStatus};
