use crate::config::types::{Config, CrawlOptions, GoogleTranslateConfig, StorageConfig, TranslateOptions};
use crate::model::LanguageSpec;
use crate::url::page_url;
use crate::ConfigError;
use scraper::Selector;
use std::collections::HashSet;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_options(&config.crawl)?;
    validate_translate_options(&config.translate_options)?;
    validate_languages(&config.languages)?;
    validate_google_translate(&config.google_translate)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates the page list and site address
fn validate_crawl_options(crawl: &CrawlOptions) -> Result<(), ConfigError> {
    if crawl.path_names.is_empty() {
        return Err(ConfigError::Validation(
            "path-names must contain at least one page".to_string(),
        ));
    }

    if crawl.protocol != "http://" && crawl.protocol != "https://" {
        return Err(ConfigError::Validation(format!(
            "protocol must be 'http://' or 'https://', got '{}'",
            crawl.protocol
        )));
    }

    if crawl.host.is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    let mut seen = HashSet::new();
    for path in &crawl.path_names {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "path '{}' must start with '/'",
                path
            )));
        }

        let url = page_url(&crawl.protocol, &crawl.host, path)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}{}{}: {}", crawl.protocol, crawl.host, path, e)))?;

        // Spellings that resolve to one page would share a record
        if !seen.insert(url) {
            return Err(ConfigError::Validation(format!(
                "path '{}' is listed more than once",
                path
            )));
        }
    }

    Ok(())
}

/// Validates the element selector
fn validate_translate_options(options: &TranslateOptions) -> Result<(), ConfigError> {
    if options.element_selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(
            "element-selector cannot be empty".to_string(),
        ));
    }

    Selector::parse(&options.element_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("'{}': {:?}", options.element_selector, e))
    })?;

    Ok(())
}

/// Validates the target languages
fn validate_languages(languages: &[LanguageSpec]) -> Result<(), ConfigError> {
    if languages.is_empty() {
        return Err(ConfigError::Validation(
            "at least one language must be configured".to_string(),
        ));
    }

    let mut ids = HashSet::new();
    for lang in languages {
        if !ids.insert(lang.id) {
            return Err(ConfigError::Validation(format!(
                "language id {} is used more than once",
                lang.id
            )));
        }

        if lang.code.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "language {} has an empty code",
                lang.id
            )));
        }
    }

    Ok(())
}

/// Validates machine translation settings
fn validate_google_translate(config: &GoogleTranslateConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    let endpoint = format!("{}{}", config.proxy_prefix, config.endpoint);
    url::Url::parse(&endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("translation endpoint '{}': {}", endpoint, e)))?;

    Ok(())
}

/// Validates output storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crawl(paths: &[&str]) -> CrawlOptions {
        CrawlOptions {
            path_names: paths.iter().map(|p| p.to_string()).collect(),
            protocol: "https://".to_string(),
            host: "example.com".to_string(),
            current_page_only: false,
            force: false,
        }
    }

    fn lang(id: u32, code: &str) -> LanguageSpec {
        LanguageSpec {
            id,
            code: code.to_string(),
            label: code.to_uppercase(),
        }
    }

    #[test]
    fn test_validate_paths() {
        assert!(validate_crawl_options(&crawl(&["/", "/about"])).is_ok());

        assert!(validate_crawl_options(&crawl(&[])).is_err());
        assert!(validate_crawl_options(&crawl(&["about"])).is_err());
        assert!(validate_crawl_options(&crawl(&["/a", "/a"])).is_err());
        assert!(validate_crawl_options(&crawl(&["/a", "/a/"])).is_err());
        assert!(validate_crawl_options(&crawl(&["/über uns", "/%C3%BCber%20uns"])).is_err());
        assert!(validate_crawl_options(&crawl(&["/o-nama", "/über uns"])).is_ok());
    }

    #[test]
    fn test_validate_protocol_and_host() {
        let mut options = crawl(&["/"]);
        options.protocol = "ftp://".to_string();
        assert!(validate_crawl_options(&options).is_err());

        let mut options = crawl(&["/"]);
        options.host = String::new();
        assert!(validate_crawl_options(&options).is_err());

        let mut options = crawl(&["/"]);
        options.protocol = "http://".to_string();
        options.host = "127.0.0.1:8080".to_string();
        assert!(validate_crawl_options(&options).is_ok());
    }

    #[test]
    fn test_validate_selector() {
        let ok = TranslateOptions {
            element_selector: ".translate".to_string(),
            translate_blanks: false,
        };
        assert!(validate_translate_options(&ok).is_ok());

        let bad = TranslateOptions {
            element_selector: "[[nope".to_string(),
            translate_blanks: false,
        };
        assert!(matches!(
            validate_translate_options(&bad),
            Err(ConfigError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_validate_languages() {
        assert!(validate_languages(&[lang(0, "hr"), lang(1, "de")]).is_ok());

        assert!(validate_languages(&[]).is_err());
        assert!(validate_languages(&[lang(0, "hr"), lang(0, "de")]).is_err());
        assert!(validate_languages(&[lang(0, " ")]).is_err());
    }

    #[test]
    fn test_validate_timeout() {
        let config = GoogleTranslateConfig {
            request_timeout_secs: 0,
            ..GoogleTranslateConfig::default()
        };
        assert!(validate_google_translate(&config).is_err());
        assert!(validate_google_translate(&GoogleTranslateConfig::default()).is_ok());
    }
}
