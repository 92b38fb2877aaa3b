//! URL validation and sanitizing helpers shared by the crawler and the
//! search query formatter.

use url::Url;

/// Returns true when the string parses as an absolute http(s) URL with a host.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Extracts the bare host from a URL for use in a `site:` search operator.
///
/// Returns `None` when the string is not a valid http(s) URL.
pub fn sanitized_host(candidate: &str) -> Option<String> {
    let url = Url::parse(candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.host_str().map(|host| host.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?x=1"));
    }

    #[test]
    fn test_invalid_urls() {
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("is this site a scam"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_sanitized_host() {
        assert_eq!(
            sanitized_host("https://Shop.Example.com/checkout").as_deref(),
            Some("shop.example.com")
        );
        assert_eq!(sanitized_host("not a url"), None);
    }
}
