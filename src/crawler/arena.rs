//! Per-page merge target for out-of-order translation results
//!
//! Every (element, language) result lands in its own slot, addressed by the
//! element's position in the page's selection order and the language's
//! position in the configuration. A slot is written at most once, and a
//! monotonic counter tells when the whole page is filled, whatever order the
//! results arrive in.

use crate::model::{ElementRecord, LanguageSpec, TranslationEntry};
use crate::page::PageElement;

#[derive(Debug)]
struct ElementSlot {
    element_id: String,
    source_html: String,
    translations: Vec<Option<TranslationEntry>>,
}

/// Collects translation results for one page
#[derive(Debug)]
pub struct PageArena<'a> {
    languages: &'a [LanguageSpec],
    slots: Vec<Option<ElementSlot>>,
    created: usize,
    filled: usize,
}

impl<'a> PageArena<'a> {
    /// Creates an arena for `element_count` elements and the given languages
    pub fn new(element_count: usize, languages: &'a [LanguageSpec]) -> Self {
        Self {
            languages,
            slots: (0..element_count).map(|_| None).collect(),
            created: 0,
            filled: 0,
        }
    }

    /// Creates the record for element `idx` if it does not exist yet
    pub fn ensure(&mut self, idx: usize, element: &PageElement) {
        let language_count = self.languages.len();
        if let Some(slot @ None) = self.slots.get_mut(idx) {
            *slot = Some(ElementSlot {
                element_id: element.id.clone(),
                source_html: element.inner_html.clone(),
                translations: vec![None; language_count],
            });
            self.created += 1;
        }
    }

    /// Stores the result for element `idx` in language `lang_idx`
    ///
    /// Returns false, leaving the arena untouched, if either index is out of
    /// range or the slot was already filled.
    pub fn insert(
        &mut self,
        idx: usize,
        element: &PageElement,
        lang_idx: usize,
        text: impl Into<String>,
    ) -> bool {
        let languages = self.languages;
        let Some(lang) = languages.get(lang_idx) else {
            return false;
        };
        if idx >= self.slots.len() {
            return false;
        }

        self.ensure(idx, element);

        let Some(Some(slot)) = self.slots.get_mut(idx) else {
            return false;
        };
        match &mut slot.translations[lang_idx] {
            Some(_) => false,
            entry @ None => {
                *entry = Some(TranslationEntry::new(lang, text));
                self.filled += 1;
                true
            }
        }
    }

    /// Returns true once every element has a record and every language slot is filled
    pub fn is_complete(&self) -> bool {
        self.created == self.slots.len() && self.filled == self.slots.len() * self.languages.len()
    }

    /// Number of filled language slots
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// `(element index, language index)` pairs still waiting for a result
    pub fn missing(&self) -> Vec<(usize, usize)> {
        let mut missing = Vec::new();
        for (idx, slot) in self.slots.iter().enumerate() {
            for lang_idx in 0..self.languages.len() {
                let filled = slot
                    .as_ref()
                    .is_some_and(|s| s.translations[lang_idx].is_some());
                if !filled {
                    missing.push((idx, lang_idx));
                }
            }
        }
        missing
    }

    /// Builds the element records in selection order, `None` until complete
    pub fn into_records(self) -> Option<Vec<ElementRecord>> {
        if !self.is_complete() {
            return None;
        }

        self.slots
            .into_iter()
            .map(|slot| {
                let slot = slot?;
                let translations = slot.translations.into_iter().collect::<Option<Vec<_>>>()?;
                Some(ElementRecord::new(
                    slot.element_id,
                    slot.source_html,
                    translations,
                ))
            })
            .collect()
    }
}
