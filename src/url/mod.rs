//! URL handling module for Site-Lingo
//!
//! Page URLs are composed from the configured protocol, host, and path, and
//! compared after normalization so that cosmetic differences (case, fragment,
//! trailing slash) never trigger a navigation.

mod normalize;

pub use normalize::normalize_location;

use crate::UrlResult;
use url::Url;

/// Builds the full URL of a page from its configured parts
///
/// # Examples
///
/// ```
/// use site_lingo::url::page_url;
///
/// let url = page_url("https://", "example.com", "/about").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn page_url(protocol: &str, host: &str, path: &str) -> UrlResult<Url> {
    normalize_location(&format!("{}{}{}", protocol, host, path))
}

/// Returns true if both strings name the same page
///
/// Unparseable locations are compared verbatim.
pub fn same_location(a: &str, b: &str) -> bool {
    match (normalize_location(a), normalize_location(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Returns true if `url` is served by the site at `protocol` + `host`
pub fn is_same_site(url: &Url, protocol: &str, host: &str) -> bool {
    let Ok(site) = page_url(protocol, host, "/") else {
        return false;
    };
    url.scheme() == site.scheme()
        && url.host_str() == site.host_str()
        && url.port_or_known_default() == site.port_or_known_default()
}

/// Extracts the path used to look up page records
pub fn path_of(url: &Url) -> String {
    url.path().to_string()
}
