//! Translation records collected from pages
//!
//! The serialized field names follow the JSON layout that translation data has
//! always been exchanged in (`page`, `elements`, `id`, `dotranslate`, ...), so an
//! exported aggregate can be pasted back into configuration unchanged.

use serde::{Deserialize, Serialize};

/// A target language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageSpec {
    /// Stable key used by translation entries and apply requests
    pub id: u32,

    /// Language code sent to the translation provider, e.g. `hr`
    pub code: String,

    /// Human-readable name
    #[serde(alias = "text", default)]
    pub label: String,
}

/// One element's text in one language
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationEntry {
    #[serde(rename = "langid")]
    pub language_id: u32,

    #[serde(rename = "langcode")]
    pub language_code: String,

    #[serde(rename = "langtext")]
    pub language_label: String,

    /// Empty when not translated or when the source was blank
    #[serde(rename = "translation")]
    pub translated_text: String,
}

impl TranslationEntry {
    /// Creates an entry for `lang` holding `text`
    pub fn new(lang: &LanguageSpec, text: impl Into<String>) -> Self {
        Self {
            language_id: lang.id,
            language_code: lang.code.clone(),
            language_label: lang.label.clone(),
            translated_text: text.into(),
        }
    }

    /// Creates an entry with no text yet
    pub fn placeholder(lang: &LanguageSpec) -> Self {
        Self::new(lang, "")
    }

    pub fn is_blank(&self) -> bool {
        self.translated_text.is_empty()
    }
}

/// A translatable element found on a page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ElementRecord {
    /// The element's `id` attribute, empty when it has none
    #[serde(rename = "id")]
    pub element_id: String,

    /// Only elements with an id can be targeted when applying
    #[serde(rename = "dotranslate")]
    pub eligible: bool,

    #[serde(rename = "innerhtml")]
    pub source_html: String,

    /// One entry per configured language, in configured order
    pub translations: Vec<TranslationEntry>,
}

impl ElementRecord {
    /// Creates a record; eligibility follows from the id
    pub fn new(
        element_id: impl Into<String>,
        source_html: impl Into<String>,
        translations: Vec<TranslationEntry>,
    ) -> Self {
        let element_id = element_id.into();
        Self {
            eligible: !element_id.is_empty(),
            element_id,
            source_html: source_html.into(),
            translations,
        }
    }

    /// Looks up the entry for a language id
    pub fn translation_for(&self, language_id: u32) -> Option<&TranslationEntry> {
        self.translations
            .iter()
            .find(|t| t.language_id == language_id)
    }
}

/// Everything collected from one page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageRecord {
    #[serde(rename = "page")]
    pub path: String,

    pub elements: Vec<ElementRecord>,
}

/// All page records of a crawl, in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Aggregate {
    pub pages: Vec<PageRecord>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Finds the record for a page path
    pub fn page(&self, path: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.path == path)
    }

    /// Appends a page record, replacing an existing record for the same path
    ///
    /// Returns true if an existing record was replaced.
    pub fn upsert(&mut self, record: PageRecord) -> bool {
        match self.pages.iter_mut().find(|p| p.path == record.path) {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.pages.push(record);
                false
            }
        }
    }

    /// Iterates over every element record of every page
    pub fn elements(&self) -> impl Iterator<Item = &ElementRecord> {
        self.pages.iter().flat_map(|p| p.elements.iter())
    }
}

impl From<Vec<PageRecord>> for Aggregate {
    fn from(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }
}
