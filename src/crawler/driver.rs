//! Page-load loop
//!
//! Plays the part of the browser: loads a page, hands it to the
//! orchestrator, and follows the navigation it asks for until the crawl
//! settles.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::orchestrator::{InitOutcome, InitRequest, Orchestrator};
use crate::page::HtmlDocument;
use crate::storage::Storage;
use crate::url::{is_same_site, path_of};
use crate::{ConfigError, LingoError};
use reqwest::Client;

/// Crawls the configured pages starting at `start_path` (default: the first)
///
/// Returns the first outcome that is not a navigation. Each configured page
/// is loaded at most once, plus one load for an unknown start path.
pub async fn run_crawl<S: Storage>(
    orchestrator: &mut Orchestrator<S>,
    client: &Client,
    start_path: Option<&str>,
) -> crate::Result<InitOutcome> {
    let crawl = orchestrator.config().crawl.clone();
    let max_loads = crawl.path_names.len() + 1;

    let start = match start_path {
        Some(path) => path.to_string(),
        None => crawl
            .path_names
            .first()
            .cloned()
            .ok_or_else(|| ConfigError::Validation("path-names cannot be empty".to_string()))?,
    };
    let mut url = orchestrator.config().url_for(&start)?;

    for load in 1..=max_loads {
        tracing::info!("Loading {} ({}/{})", url, load, crawl.path_names.len());

        let html = fetch_page(client, &url).await?;
        let mut page = HtmlDocument::new(url.as_str(), html);
        let request = InitRequest::crawl(path_of(&url));

        match orchestrator.init(&request, &mut page).await {
            InitOutcome::Navigate { url: next } => {
                if !is_same_site(&next, &crawl.protocol, &crawl.host) {
                    return Err(LingoError::OffSite {
                        url: next.to_string(),
                    });
                }
                url = next;
            }
            outcome => return Ok(outcome),
        }
    }

    Err(LingoError::NavigationLimit { loads: max_loads })
}
