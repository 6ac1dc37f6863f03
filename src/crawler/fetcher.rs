//! HTTP page fetching
//!
//! Pages are loaded with a plain GET. Redirects are followed by the client;
//! any non-success status ends the crawl with [`LingoError::Fetch`].

use crate::config::UserAgentConfig;
use crate::LingoError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used to load pages
///
/// # Example
///
/// ```no_run
/// use site_lingo::config::UserAgentConfig;
/// use site_lingo::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, LingoError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| LingoError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LingoError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.is_empty() && !content_type.contains("html") {
        tracing::warn!("{} served as '{}', parsing as HTML anyway", url, content_type);
    }

    response.text().await.map_err(|source| LingoError::Http {
        url: url.to_string(),
        source,
    })
}
