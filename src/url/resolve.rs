use url::Url;

/// Resolves a link href against the page it appeared on
///
/// Returns None if the link should not be followed:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
