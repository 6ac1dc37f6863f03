use crate::model::LanguageSpec;
use serde::{Deserialize, Serialize};

/// Default Google Translate v2 endpoint
pub const DEFAULT_TRANSLATE_ENDPOINT: &str =
    "https://translation.googleapis.com/language/translate/v2";

/// Main configuration structure for Site-Lingo
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub crawl: CrawlOptions,
    #[serde(rename = "translate-options")]
    pub translate_options: TranslateOptions,
    #[serde(default)]
    pub languages: Vec<LanguageSpec>,
    #[serde(rename = "google-translate", default)]
    pub google_translate: GoogleTranslateConfig,
    pub storage: StorageConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Which pages make up the crawl and how it starts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlOptions {
    /// Ordered page paths, each appended to `protocol` + `host`
    #[serde(rename = "path-names")]
    pub path_names: Vec<String>,

    /// Scheme prefix including the separator, e.g. `https://`
    pub protocol: String,

    /// Host (and optional port) of the site
    pub host: String,

    /// Collect only the page being loaded and stop there
    #[serde(rename = "current-page-only", default)]
    pub current_page_only: bool,

    /// Collect even when a finished aggregate is already stored
    #[serde(default)]
    pub force: bool,
}

/// How translatable elements are found and rewritten
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslateOptions {
    /// CSS selector marking translatable elements
    #[serde(rename = "element-selector")]
    pub element_selector: String,

    /// Write empty translations into the page instead of warning
    #[serde(rename = "translate-blanks", default)]
    pub translate_blanks: bool,
}

/// Machine translation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleTranslateConfig {
    #[serde(default)]
    pub enable: bool,

    /// Prepended verbatim to the endpoint (CORS proxies and the like)
    #[serde(rename = "proxy-prefix", default)]
    pub proxy_prefix: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound on in-flight requests per page; 0 means unbounded
    #[serde(rename = "max-concurrent-requests", default)]
    pub max_concurrent_requests: usize,

    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Record a blank translation for failed requests so the page still completes
    #[serde(rename = "fill-failed-with-blank", default)]
    pub fill_failed_with_blank: bool,
}

impl Default for GoogleTranslateConfig {
    fn default() -> Self {
        Self {
            enable: false,
            proxy_prefix: String::new(),
            endpoint: default_endpoint(),
            max_concurrent_requests: 0,
            request_timeout_secs: default_timeout_secs(),
            fill_failed_with_blank: false,
        }
    }
}

/// Persistent slot storage
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// User agent sent when fetching pages
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_agent_name")]
    pub name: String,

    #[serde(default = "default_agent_version")]
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            version: default_agent_version(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value, e.g. `site-lingo/0.1.0`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

fn default_endpoint() -> String {
    DEFAULT_TRANSLATE_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_agent_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
