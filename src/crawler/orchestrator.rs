//! Per-page-load entry point
//!
//! Every page load of a crawl calls [`Orchestrator::init`]. The stored
//! snapshot decides the mode: while no finished aggregate exists (or a
//! re-crawl is forced) the page is collected and the next configured page is
//! requested; once the aggregate is finished the page can be rewritten into
//! a chosen language instead.

use crate::config::Config;
use crate::crawler::applier::{apply, ApplyResult};
use crate::crawler::collector::{collect_page, CollectOutcome, MissingTranslation};
use crate::gateway::Translator;
use crate::model::Aggregate;
use crate::page::Page;
use crate::state::AggregateSnapshot;
use crate::storage::Storage;
use crate::url::same_location;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Message returned when apply mode is entered without an apply request
pub const NOT_APPLIED_MESSAGE: &str = "not translated";

/// One page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    /// Target language for apply mode
    pub language_id: u32,

    /// Path of the loaded page, either as listed in `path-names` or as it
    /// appears in the page URL
    pub current_path: String,

    /// Rewrite the page if a finished aggregate exists
    pub should_apply: bool,
}

impl InitRequest {
    /// A page load that only collects
    pub fn crawl(current_path: impl Into<String>) -> Self {
        Self {
            language_id: 0,
            current_path: current_path.into(),
            should_apply: false,
        }
    }

    /// A page load that rewrites the page into `language_id`
    pub fn apply(language_id: u32, current_path: impl Into<String>) -> Self {
        Self {
            language_id,
            current_path: current_path.into(),
            should_apply: true,
        }
    }
}

/// The finished aggregate, keyed the way it is exchanged as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectedData {
    #[serde(rename = "translationdata")]
    pub translation_data: Aggregate,
}

/// What a page load resulted in
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    /// Load this URL next; the crawl continues there
    Navigate { url: Url },

    /// The page was collected and the next page is the one already loaded
    Idle { path: String },

    /// The last page was collected; the aggregate is finished
    Collected(CollectedData),

    /// The page was rewritten into the requested language
    Applied(ApplyResult),

    /// A finished aggregate exists but no rewrite was requested
    NotApplied { success: bool, message: String },

    /// Translations are missing for this page; nothing was stored for it
    Stalled {
        path: String,
        missing: Vec<MissingTranslation>,
    },

    /// Collection failed and the stored aggregate was dropped
    Aborted { reason: String },
}

/// Drives collection and application across page loads
pub struct Orchestrator<S: Storage> {
    config: Arc<Config>,
    storage: S,
    translator: Option<Arc<dyn Translator>>,
    session: String,
}

impl<S: Storage> Orchestrator<S> {
    pub fn new(config: Arc<Config>, storage: S) -> Self {
        let session = config.session_fingerprint();
        Self {
            config,
            storage,
            translator: None,
            session,
        }
    }

    /// Sets the gateway used when translation is enabled
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fingerprint stamped on snapshots this orchestrator writes
    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Handles one page load
    pub async fn init<P: Page>(&mut self, request: &InitRequest, page: &mut P) -> InitOutcome {
        let stored = match self.storage.load_snapshot() {
            Ok(stored) => stored,
            Err(e) => return self.abort(&request.current_path, e.into()),
        };

        match stored {
            Some(snapshot) if snapshot.is_ready() && !self.config.crawl.force => {
                self.apply_mode(request, &snapshot.pages, page)
            }
            stored => match self.collection_mode(request, &*page, stored).await {
                Ok(outcome) => outcome,
                Err(e) => self.abort(&request.current_path, e),
            },
        }
    }

    fn apply_mode<P: Page>(
        &self,
        request: &InitRequest,
        aggregate: &Aggregate,
        page: &mut P,
    ) -> InitOutcome {
        if !request.should_apply {
            tracing::debug!("Finished aggregate present, {} left as is", request.current_path);
            return InitOutcome::NotApplied {
                success: true,
                message: NOT_APPLIED_MESSAGE.to_string(),
            };
        }

        InitOutcome::Applied(apply(
            request.language_id,
            &request.current_path,
            &self.config,
            aggregate,
            page,
        ))
    }

    async fn collection_mode<P: Page>(
        &mut self,
        request: &InitRequest,
        page: &P,
        stored: Option<AggregateSnapshot>,
    ) -> crate::Result<InitOutcome> {
        let config = Arc::clone(&self.config);
        let requested = request.current_path.as_str();

        let Some(index) = config.path_index(requested) else {
            let first = config.crawl.path_names.first().ok_or_else(|| {
                ConfigError::Validation("path-names cannot be empty".to_string())
            })?;
            tracing::warn!("{} is not a configured page, restarting at {}", requested, first);
            return Ok(InitOutcome::Navigate {
                url: config.url_for(first)?,
            });
        };
        // Records are keyed by the configured spelling
        let path = config.crawl.path_names[index].as_str();

        let stale = stored
            .as_ref()
            .is_some_and(|snapshot| !snapshot.can_resume(&self.session));
        if index == 0 || config.crawl.current_page_only || stale {
            if stored.is_some() {
                tracing::info!("Dropping stored aggregate before collecting {}", path);
            }
            self.storage.clear_snapshot()?;
        }

        let outcome = collect_page(
            path,
            &config,
            page,
            &mut self.storage,
            self.translator.as_deref(),
            &self.session,
        )
        .await?;
        if let CollectOutcome::Incomplete { missing } = outcome {
            return Ok(InitOutcome::Stalled {
                path: path.to_string(),
                missing,
            });
        }

        if !config.crawl.current_page_only {
            if let Some(next) = config.crawl.path_names.get(index + 1) {
                let url = config.url_for(next)?;
                if same_location(url.as_str(), page.location()) {
                    return Ok(InitOutcome::Idle {
                        path: path.to_string(),
                    });
                }
                tracing::info!(
                    "Page {}/{} done, continuing at {}",
                    index + 1,
                    config.crawl.path_names.len(),
                    url
                );
                return Ok(InitOutcome::Navigate { url });
            }
        }

        let mut snapshot = self
            .storage
            .load_snapshot()?
            .unwrap_or_else(|| AggregateSnapshot::new(self.session.as_str()));
        snapshot.mark_complete();
        self.storage.save_snapshot(&snapshot)?;

        tracing::info!(
            "Crawl complete: {} pages, {} elements",
            snapshot.pages.len(),
            snapshot.pages.elements().count()
        );
        Ok(InitOutcome::Collected(CollectedData {
            translation_data: snapshot.pages,
        }))
    }

    fn abort(&mut self, path: &str, error: crate::LingoError) -> InitOutcome {
        tracing::error!("Collection on {} failed: {}", path, error);
        if let Err(e) = self.storage.clear_snapshot() {
            tracing::error!("Failed to clear the stored aggregate: {}", e);
        }
        InitOutcome::Aborted {
            reason: error.to_string(),
        }
    }
}
