//! Page collection
//!
//! Finds every translatable element on a page, attaches one translation entry
//! per configured language, and stores the result as the page's record in the
//! aggregate slot.

use crate::config::{Config, GoogleTranslateConfig};
use crate::crawler::arena::PageArena;
use crate::gateway::{GatewayError, Translator};
use crate::model::{ElementRecord, LanguageSpec, PageRecord, TranslationEntry};
use crate::page::{Page, PageElement};
use crate::state::AggregateSnapshot;
use crate::storage::{Storage, StorageResult};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashMap;

/// Result of collecting one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The page record was written to the slot
    Collected {
        elements: usize,
        /// An earlier record for the same path was replaced
        replaced: bool,
    },

    /// Some translations failed; nothing was written
    Incomplete { missing: Vec<MissingTranslation> },
}

/// A translation that could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTranslation {
    pub element_index: usize,
    pub element_id: String,
    pub language_id: u32,
    pub reason: String,
}

/// Collects the page at `path` and stores its record
///
/// With translation disabled every element gets blank placeholder entries.
/// With translation enabled one request per element and language is issued,
/// all of them in flight at once up to `max-concurrent-requests`, and results
/// are merged as they complete.
pub async fn collect_page<S: Storage, P: Page>(
    path: &str,
    config: &Config,
    page: &P,
    storage: &mut S,
    translator: Option<&dyn Translator>,
    session: &str,
) -> crate::Result<CollectOutcome> {
    let elements = page.select(&config.translate_options.element_selector)?;
    let languages = &config.languages;

    tracing::info!(
        "Collecting {} elements x {} languages on {}",
        elements.len(),
        languages.len(),
        path
    );

    let records = if config.google_translate.enable {
        let translator = translator.ok_or_else(|| {
            GatewayError::Config("translation is enabled but no gateway is configured".to_string())
        })?;
        match translate_elements(&elements, languages, translator, &config.google_translate).await
        {
            Ok(records) => records,
            Err(missing) => {
                tracing::warn!(
                    "Page {} is missing {} translations, not storing it",
                    path,
                    missing.len()
                );
                return Ok(CollectOutcome::Incomplete { missing });
            }
        }
    } else {
        elements
            .iter()
            .map(|element| {
                ElementRecord::new(
                    element.id.clone(),
                    element.inner_html.clone(),
                    languages.iter().map(TranslationEntry::placeholder).collect(),
                )
            })
            .collect()
    };

    let count = records.len();
    let replaced = store_page(
        storage,
        session,
        PageRecord {
            path: path.to_string(),
            elements: records,
        },
    )?;

    if replaced {
        tracing::info!("Replaced earlier record for {} ({} elements)", path, count);
    } else {
        tracing::info!("Stored record for {} ({} elements)", path, count);
    }

    Ok(CollectOutcome::Collected {
        elements: count,
        replaced,
    })
}

/// Translates every element into every language
///
/// Returns the records in selection order, or the pairs that failed.
async fn translate_elements(
    elements: &[PageElement],
    languages: &[LanguageSpec],
    translator: &dyn Translator,
    options: &GoogleTranslateConfig,
) -> Result<Vec<ElementRecord>, Vec<MissingTranslation>> {
    let mut arena = PageArena::new(elements.len(), languages);

    if languages.is_empty() {
        for (idx, element) in elements.iter().enumerate() {
            arena.ensure(idx, element);
        }
    }

    let total = elements.len() * languages.len();
    let limit = match options.max_concurrent_requests {
        0 => total.max(1),
        n => n,
    };

    let requests = elements.iter().enumerate().flat_map(move |(idx, element)| {
        languages.iter().enumerate().map(move |(lang_idx, lang)| async move {
            let result = translator.translate(&element.inner_html, &lang.code).await;
            (idx, lang_idx, result)
        })
    });
    let mut completions = stream::iter(requests).buffer_unordered(limit);

    let mut reasons = HashMap::new();
    while let Some((idx, lang_idx, result)) = completions.next().await {
        let element = &elements[idx];
        let lang = &languages[lang_idx];

        match result {
            Ok(text) => {
                tracing::debug!(
                    "Translated element #{} into {} ({}/{})",
                    idx,
                    lang.code,
                    arena.filled() + 1,
                    total
                );
                arena.insert(idx, element, lang_idx, text);
            }
            Err(e) => {
                tracing::warn!(
                    "{} failed on element #{} ('{}') -> {}: {}",
                    translator.provider_name(),
                    idx,
                    element.id,
                    lang.code,
                    e
                );
                if options.fill_failed_with_blank {
                    arena.insert(idx, element, lang_idx, "");
                } else {
                    reasons.insert((idx, lang_idx), e.to_string());
                }
            }
        }
    }

    if !arena.is_complete() {
        let missing = arena
            .missing()
            .into_iter()
            .map(|(idx, lang_idx)| MissingTranslation {
                element_index: idx,
                element_id: elements[idx].id.clone(),
                language_id: languages[lang_idx].id,
                reason: reasons
                    .remove(&(idx, lang_idx))
                    .unwrap_or_else(|| "no result".to_string()),
            })
            .collect();
        return Err(missing);
    }
    arena.into_records().ok_or_else(Vec::new)
}

/// Adds a page record to the stored snapshot, creating the snapshot if needed
fn store_page<S: Storage>(
    storage: &mut S,
    session: &str,
    record: PageRecord,
) -> StorageResult<bool> {
    let mut snapshot = storage
        .load_snapshot()?
        .unwrap_or_else(|| AggregateSnapshot::new(session));
    let replaced = snapshot.record_page(record);
    storage.save_snapshot(&snapshot)?;
    Ok(replaced)
}
