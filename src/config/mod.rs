//! Configuration module for Site-Lingo
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use site_lingo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("site-lingo.toml")).unwrap();
//! println!("Crawl starts at: {}", config.crawl.path_names[0]);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlOptions, GoogleTranslateConfig, StorageConfig, TranslateOptions,
    UserAgentConfig, DEFAULT_TRANSLATE_ENDPOINT,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, parse_config, session_fingerprint,
};
pub use validation::validate;

use crate::url::page_url;
use crate::UrlResult;
use url::Url;

impl Config {
    /// Position of `path` in the configured page list
    ///
    /// Paths match verbatim or when they resolve to the same page URL, so a
    /// percent-encoded path taken from a loaded URL finds its configured
    /// spelling.
    pub fn path_index(&self, path: &str) -> Option<usize> {
        let paths = &self.crawl.path_names;
        if let Some(index) = paths.iter().position(|p| p == path) {
            return Some(index);
        }

        let wanted = self.url_for(path).ok()?;
        paths
            .iter()
            .position(|p| self.url_for(p).is_ok_and(|url| url == wanted))
    }

    /// The configured spelling of `path`, used as the page record key
    pub fn configured_path(&self, path: &str) -> Option<&str> {
        self.path_index(path)
            .map(|index| self.crawl.path_names[index].as_str())
    }

    /// Full URL of a configured page path
    pub fn url_for(&self, path: &str) -> UrlResult<Url> {
        page_url(&self.crawl.protocol, &self.crawl.host, path)
    }

    /// Fingerprint identifying the crawl this configuration describes
    pub fn session_fingerprint(&self) -> String {
        session_fingerprint(self)
    }
}
