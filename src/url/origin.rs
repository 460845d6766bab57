use crate::{UrlError, UrlResult};
use url::Url;

/// Returns the origin (`scheme://host[:port]`) of an http(s) URL
///
/// The host is lowercased and default ports are omitted, so every URL on a
/// site maps to the same origin string.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use event_scraper::url::origin_of;
///
/// let url = Url::parse("https://Events.Example.com/list?page=2").unwrap();
/// assert_eq!(origin_of(&url).unwrap(), "https://events.example.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(origin_of(&url).unwrap(), "http://127.0.0.1:8080");
/// ```
pub fn origin_of(url: &Url) -> UrlResult<String> {
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url.origin().ascii_serialization())
}

/// Returns the robots.txt location for the site serving `url`
pub fn robots_url(url: &Url) -> UrlResult<Url> {
    let origin = origin_of(url)?;
    Url::parse(&format!("{}/robots.txt", origin)).map_err(|e| UrlError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_simple() {
        let url = Url::parse("https://example.com/events").unwrap();
        assert_eq!(origin_of(&url).unwrap(), "https://example.com");
    }

    #[test]
    fn test_origin_drops_path_query_fragment() {
        let url = Url::parse("https://example.com/a/b?page=3#top").unwrap();
        assert_eq!(origin_of(&url).unwrap(), "https://example.com");
    }

    #[test]
    fn test_origin_keeps_explicit_port() {
        let url = Url::parse("https://example.com:8443/").unwrap();
        assert_eq!(origin_of(&url).unwrap(), "https://example.com:8443");
    }

    #[test]
    fn test_origin_omits_default_port() {
        let url = Url::parse("http://example.com:80/page").unwrap();
        assert_eq!(origin_of(&url).unwrap(), "http://example.com");
    }

    #[test]
    fn test_origin_rejects_other_schemes() {
        let url = Url::parse("ftp://example.com/file").unwrap();
        assert!(matches!(origin_of(&url), Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_robots_url() {
        let url = Url::parse("https://example.com/events/2024?page=1").unwrap();
        assert_eq!(
            robots_url(&url).unwrap().as_str(),
            "https://example.com/robots.txt"
        );
    }

    #[test]
    fn test_robots_url_with_port() {
        let url = Url::parse("http://127.0.0.1:4000/").unwrap();
        assert_eq!(
            robots_url(&url).unwrap().as_str(),
            "http://127.0.0.1:4000/robots.txt"
        );
    }
}
