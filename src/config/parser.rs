use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_lingo::config::load_config;
///
/// let config = load_config(Path::new("site-lingo.toml")).unwrap();
/// println!("Pages: {:?}", config.crawl.path_names);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its file hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Fingerprints the parts of a configuration that shape the collected data
///
/// Two configurations with the same page list, site, selector, and languages
/// produce the same fingerprint, so a crawl can resume across page loads only
/// while these stay fixed. Flags such as `force` or the API proxy do not
/// participate.
pub fn session_fingerprint(config: &Config) -> String {
    let mut hasher = Sha256::new();
    hasher.update(config.crawl.protocol.as_bytes());
    hasher.update([0]);
    hasher.update(config.crawl.host.as_bytes());
    hasher.update([0]);
    for path in &config.crawl.path_names {
        hasher.update(path.as_bytes());
        hasher.update([0]);
    }
    hasher.update(config.translate_options.element_selector.as_bytes());
    hasher.update([0]);
    for lang in &config.languages {
        hasher.update(lang.id.to_le_bytes());
        hasher.update(lang.code.as_bytes());
        hasher.update([0]);
    }
    hasher.update([u8::from(config.google_translate.enable)]);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_CONFIG: &str = r#"
[crawl]
path-names = ["/", "/about"]
protocol = "https://"
host = "example.com"

[translate-options]
element-selector = ".translate"

[[languages]]
id = 0
code = "hr"
label = "Croatian"

[[languages]]
id = 1
code = "de"
label = "German"

[google-translate]
enable = true
max-concurrent-requests = 8

[storage]
database-path = "./test.db"
"#;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.path_names, vec!["/", "/about"]);
        assert!(!config.crawl.force);
        assert!(!config.crawl.current_page_only);
        assert_eq!(config.languages.len(), 2);
        assert_eq!(config.languages[1].code, "de");
        assert!(config.google_translate.enable);
        assert_eq!(config.google_translate.max_concurrent_requests, 8);
        assert_eq!(config.google_translate.request_timeout_secs, 30);
        assert!(!config.translate_options.translate_blanks);
        assert_eq!(config.user_agent.name, "site-lingo");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/site-lingo.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = VALID_CONFIG.replace(r#"path-names = ["/", "/about"]"#, "path-names = []");
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_fingerprint_ignores_force_flag() {
        let mut config = parse_config(VALID_CONFIG).unwrap();
        let before = session_fingerprint(&config);
        config.crawl.force = true;
        config.crawl.current_page_only = true;
        assert_eq!(before, session_fingerprint(&config));
    }

    #[test]
    fn test_fingerprint_tracks_page_list() {
        let mut config = parse_config(VALID_CONFIG).unwrap();
        let before = session_fingerprint(&config);
        config.crawl.path_names.push("/contact".to_string());
        assert_ne!(before, session_fingerprint(&config));
    }
}
