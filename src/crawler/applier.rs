//! Rewriting a page into a chosen language
//!
//! The applier only reads the aggregate. Problems are reported in the
//! returned [`ApplyResult`] instead of being raised.

use crate::config::Config;
use crate::model::Aggregate;
use crate::page::{ContentRewrite, Page};
use serde::Serialize;
use std::fmt;

/// Outcome of applying one language to one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyResult {
    /// True when no errors were recorded
    pub success: bool,
    pub errors: Vec<ApplyError>,
    pub warnings: Vec<ApplyWarning>,
    /// Number of elements whose content was replaced
    pub applied: usize,
}

impl ApplyResult {
    fn finish(mut self) -> Self {
        self.success = self.errors.is_empty();
        self
    }
}

/// A problem that prevented part of the page from being translated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplyError {
    MissingPage { path: String },
    MissingTranslation { element_id: String, language_id: u32 },
    PageAccess { message: String },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::MissingPage { path } => {
                write!(f, "No translation data for page {}", path)
            }
            ApplyError::MissingTranslation {
                element_id,
                language_id,
            } => write!(
                f,
                "No translation for element '{}' in language {}",
                element_id, language_id
            ),
            ApplyError::PageAccess { message } => write!(f, "Page access failed: {}", message),
        }
    }
}

/// A problem that left an element untouched without failing the apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplyWarning {
    MissingElementId { source_html: String },
    BlankTranslation { element_id: String, language_id: u32 },
}

impl fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyWarning::MissingElementId { source_html } => {
                write!(f, "Element has no id and cannot be targeted: {}", source_html)
            }
            ApplyWarning::BlankTranslation {
                element_id,
                language_id,
            } => write!(
                f,
                "Translation for element '{}' in language {} is blank",
                element_id, language_id
            ),
        }
    }
}

/// Rewrites the elements of `page` into `language_id` using stored data
///
/// Elements are matched to records by id. Elements without a matching
/// eligible record are left alone. All replacements are written in one pass
/// over the selection taken before any of them, so nested elements never
/// shift each other's targets.
pub fn apply<P: Page>(
    language_id: u32,
    path: &str,
    config: &Config,
    aggregate: &Aggregate,
    page: &mut P,
) -> ApplyResult {
    let mut result = ApplyResult::default();

    let path = config.configured_path(path).unwrap_or(path);
    let Some(record) = aggregate.page(path) else {
        tracing::warn!("No translation data for {}", path);
        result.errors.push(ApplyError::MissingPage {
            path: path.to_string(),
        });
        return result.finish();
    };

    let selector = &config.translate_options.element_selector;
    let elements = match page.select(selector) {
        Ok(elements) => elements,
        Err(e) => {
            result.errors.push(ApplyError::PageAccess {
                message: e.to_string(),
            });
            return result.finish();
        }
    };

    let mut rewrites = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        let Some(stored) = record
            .elements
            .iter()
            .find(|r| r.eligible && r.element_id == element.id)
        else {
            continue;
        };

        if stored.element_id.is_empty() {
            result.warnings.push(ApplyWarning::MissingElementId {
                source_html: stored.source_html.clone(),
            });
            continue;
        }

        let Some(entry) = stored.translation_for(language_id) else {
            result.errors.push(ApplyError::MissingTranslation {
                element_id: stored.element_id.clone(),
                language_id,
            });
            continue;
        };

        if entry.is_blank() && !config.translate_options.translate_blanks {
            result.warnings.push(ApplyWarning::BlankTranslation {
                element_id: stored.element_id.clone(),
                language_id,
            });
            continue;
        }

        rewrites.push(ContentRewrite::new(index, entry.translated_text.as_str()));
    }

    match page.replace_contents(selector, &rewrites) {
        Ok(()) => result.applied = rewrites.len(),
        Err(e) => result.errors.push(ApplyError::PageAccess {
            message: e.to_string(),
        }),
    }

    tracing::info!(
        "Applied language {} to {} elements on {}",
        language_id,
        result.applied,
        path
    );
    result.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::model::{ElementRecord, LanguageSpec, PageRecord, TranslationEntry};
    use crate::page::HtmlDocument;

    const CONFIG: &str = r#"
[crawl]
path-names = ["/a"]
protocol = "https://"
host = "example.com"

[translate-options]
element-selector = ".translate"

[[languages]]
id = 0
code = "hr"

[[languages]]
id = 1
code = "de"

[storage]
database-path = "./unused.db"
"#;

    const PAGE: &str = r#"<html><body>
<h1 class="translate" id="x">Hello</h1>
<p class="translate">World</p>
<div class="translate" id="z">Bye</div>
</body></html>"#;

    fn lang(id: u32, code: &str) -> LanguageSpec {
        LanguageSpec {
            id,
            code: code.to_string(),
            label: String::new(),
        }
    }

    fn aggregate(z_de: &str) -> Aggregate {
        Aggregate::from(vec![PageRecord {
            path: "/a".to_string(),
            elements: vec![
                ElementRecord::new(
                    "x",
                    "Hello",
                    vec![
                        TranslationEntry::new(&lang(0, "hr"), "Bok"),
                        TranslationEntry::new(&lang(1, "de"), "Hallo"),
                    ],
                ),
                ElementRecord::new("", "World", vec![TranslationEntry::new(&lang(1, "de"), "Welt")]),
                ElementRecord::new(
                    "z",
                    "Bye",
                    vec![
                        TranslationEntry::new(&lang(0, "hr"), "Bok bok"),
                        TranslationEntry::new(&lang(1, "de"), z_de),
                    ],
                ),
            ],
        }])
    }

    fn page() -> HtmlDocument {
        HtmlDocument::new("https://example.com/a", PAGE)
    }

    fn contents(page: &HtmlDocument) -> Vec<String> {
        page.select(".translate")
            .unwrap()
            .into_iter()
            .map(|e| e.inner_html)
            .collect()
    }

    #[test]
    fn test_applies_by_element_id() {
        let config = parse_config(CONFIG).unwrap();
        let mut page = page();

        let result = apply(1, "/a", &config, &aggregate("Tschüss"), &mut page);
        assert!(result.success);
        assert_eq!(result.applied, 2);
        assert!(result.warnings.is_empty());
        assert_eq!(contents(&page), vec!["Hallo", "World", "Tschüss"]);
    }

    #[test]
    fn test_missing_page_is_error_without_changes() {
        let config = parse_config(CONFIG).unwrap();
        let mut page = page();

        let result = apply(1, "/other", &config, &aggregate("Tschüss"), &mut page);
        assert!(!result.success);
        assert_eq!(
            result.errors,
            vec![ApplyError::MissingPage {
                path: "/other".to_string()
            }]
        );
        assert_eq!(page.html(), PAGE);
    }

    #[test]
    fn test_absent_language_names_element_and_language() {
        let config = parse_config(CONFIG).unwrap();
        let mut page = page();

        let result = apply(5, "/a", &config, &aggregate("Tschüss"), &mut page);
        assert!(!result.success);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.errors[0],
            ApplyError::MissingTranslation {
                element_id: "x".to_string(),
                language_id: 5
            }
        );
        assert_eq!(
            result.errors[0].to_string(),
            "No translation for element 'x' in language 5"
        );
        assert_eq!(contents(&page), vec!["Hello", "World", "Bye"]);
    }

    #[test]
    fn test_blank_translation_warns_by_default() {
        let config = parse_config(CONFIG).unwrap();
        let mut page = page();

        let result = apply(1, "/a", &config, &aggregate(""), &mut page);
        assert!(result.success);
        assert_eq!(
            result.warnings,
            vec![ApplyWarning::BlankTranslation {
                element_id: "z".to_string(),
                language_id: 1
            }]
        );
        assert_eq!(contents(&page), vec!["Hallo", "World", "Bye"]);
    }

    #[test]
    fn test_blank_translation_written_when_enabled() {
        let mut config = parse_config(CONFIG).unwrap();
        config.translate_options.translate_blanks = true;
        let mut page = page();

        let result = apply(1, "/a", &config, &aggregate(""), &mut page);
        assert!(result.success);
        assert!(result.warnings.is_empty());
        assert_eq!(contents(&page), vec!["Hallo", "World", ""]);
    }

    #[test]
    fn test_eligible_record_without_id_warns() {
        let config = parse_config(CONFIG).unwrap();
        let mut aggregate = aggregate("Tschüss");
        aggregate.pages[0].elements[1].eligible = true;
        let mut page = page();

        let result = apply(1, "/a", &config, &aggregate, &mut page);
        assert!(result.success);
        assert_eq!(
            result.warnings,
            vec![ApplyWarning::MissingElementId {
                source_html: "World".to_string()
            }]
        );
        assert_eq!(contents(&page), vec!["Hallo", "World", "Tschüss"]);
    }

    #[test]
    fn test_nested_elements_keep_their_own_translations() {
        let config = parse_config(CONFIG).unwrap();
        let aggregate = Aggregate::from(vec![PageRecord {
            path: "/a".to_string(),
            elements: vec![
                ElementRecord::new(
                    "outer",
                    "Out <span class=\"translate\" id=\"inner\">In</span>",
                    vec![TranslationEntry::new(&lang(0, "hr"), "VANJSKI")],
                ),
                ElementRecord::new(
                    "inner",
                    "In",
                    vec![TranslationEntry::new(&lang(0, "hr"), "UNUTARNJI")],
                ),
                ElementRecord::new("z", "Zed", vec![TranslationEntry::new(&lang(0, "hr"), "ZED")]),
            ],
        }]);
        let mut page = HtmlDocument::new(
            "https://example.com/a",
            r#"<div class=translate id=outer>Out <span class=translate id=inner>In</span></div><p class=translate id=z>Zed</p>"#,
        );

        let result = apply(0, "/a", &config, &aggregate, &mut page);
        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.applied, 3);
        assert_eq!(contents(&page), vec!["VANJSKI", "ZED"]);
    }

    #[test]
    fn test_repeated_id_gets_same_translation() {
        let config = parse_config(CONFIG).unwrap();
        let mut page = HtmlDocument::new(
            "https://example.com/a",
            r#"<p class="translate" id="x">Hello</p><p class="translate" id="x">Hello</p><p class="translate" id="z">Bye</p>"#,
        );

        let result = apply(0, "/a", &config, &aggregate("Tschüss"), &mut page);
        assert!(result.success);
        assert_eq!(result.applied, 3);
        assert_eq!(contents(&page), vec!["Bok", "Bok", "Bok bok"]);
    }

    #[test]
    fn test_result_serializes_with_kind_tags() {
        let config = parse_config(CONFIG).unwrap();
        let mut page = page();
        let result = apply(1, "/other", &config, &aggregate("x"), &mut page);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["kind"], "missing_page");
        assert_eq!(json["errors"][0]["path"], "/other");
    }
}
