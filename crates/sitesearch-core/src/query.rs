//! Query extraction from the page location

use url::{form_urlencoded, Url};

/// Value of the first `param` parameter in `location`, form-decoded.
///
/// `location` may be an absolute URL, a path with a query string
/// (`/search/?query=cats`) or a bare query string (`?query=cats`,
/// `query=cats`). Returns `None` when the parameter is absent.
pub fn extract_query(location: &str, param: &str) -> Option<String> {
    let location = location.trim();

    if let Ok(url) = Url::parse(location) {
        return url
            .query_pairs()
            .find(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned());
    }

    let without_fragment = location.split('#').next().unwrap_or_default();
    let query_string = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => return None,
    };

    form_urlencoded::parse(query_string.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}
