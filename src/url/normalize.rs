use crate::UrlError;
use url::Url;

/// Normalizes a page location for comparison
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Lowercase the host (done by the parser)
/// 3. Remove the fragment
/// 4. Remove a trailing slash (except for root /)
/// 5. Remove an empty query string
///
/// # Examples
///
/// ```
/// use site_lingo::url::normalize_location;
///
/// let url = normalize_location("https://EXAMPLE.com/about/#team").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn normalize_location(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(if trimmed.is_empty() { "/" } else { &trimmed });
    }

    if url.query() == Some("") {
        url.set_query(None);
    }

    Ok(url)
}
