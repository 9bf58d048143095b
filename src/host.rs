/// Host normalization and validation for share targets
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SCHEME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("scheme pattern is valid"));

static FALLBACK_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}._:\[\]-]+$").expect("fallback pattern is valid"));

static HOST_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9.-]+\.[a-z]{2,}$").expect("host pattern is valid"));

/// Reduce arbitrary user text to a canonical lowercase host
///
/// Algorithm:
/// 1. Input containing `://` is parsed as a URL as-is
/// 2. Anything else is parsed with `https://` prepended
/// 3. The URL's host is taken, plus its port when one is explicitly given
/// 4. If parsing fails, strip a leading `http(s)://` and keep the text
///    before the first `/`, provided it still reads as a host
///
/// Examples:
/// - `MASTODON.social` → `mastodon.social`
/// - `https://Foo.Bar/share?x=1` → `foo.bar`
/// - `hachyderm.io/@someone` → `hachyderm.io`
/// - `not a host!!` → `None`
pub fn normalize_host(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }

    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input.trim())
    };

    match Url::parse(&candidate) {
        Ok(url) => host_of(&url).or_else(|| fallback_host(input)),
        Err(_) => fallback_host(input),
    }
}

/// Host part of a parsed URL, with the port when it differs from the scheme default
fn host_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }

    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Pattern-based extraction used when the URL parser rejects the input
fn fallback_host(input: &str) -> Option<String> {
    let stripped = SCHEME_PREFIX.replace(input.trim(), "");
    let host = stripped.split('/').next()?.to_lowercase();

    if FALLBACK_HOST.is_match(&host) {
        Some(host)
    } else {
        None
    }
}

/// Check that a freshly typed host has the `label(.label)+` shape with an alphabetic TLD
///
/// Hosts declared in widget markup or read back from storage are not checked.
pub fn looks_like_host(host: &str) -> bool {
    HOST_SHAPE.is_match(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_host() {
        assert_eq!(normalize_host("MASTODON.social"), Some("mastodon.social".to_string()));
        assert_eq!(normalize_host("hachyderm.io"), Some("hachyderm.io".to_string()));
        assert_eq!(normalize_host("  fosstodon.org  "), Some("fosstodon.org".to_string()));
    }

    #[test]
    fn test_normalize_full_url() {
        assert_eq!(normalize_host("https://Foo.Bar/share?x=1"), Some("foo.bar".to_string()));
        assert_eq!(normalize_host("http://infosec.exchange/"), Some("infosec.exchange".to_string()));
        assert_eq!(normalize_host("HTTPS://Mastodon.Social/@user"), Some("mastodon.social".to_string()));
    }

    #[test]
    fn test_normalize_host_with_path() {
        assert_eq!(normalize_host("hachyderm.io/@someone"), Some("hachyderm.io".to_string()));
        assert_eq!(normalize_host("fosstodon.org/share?text=hi"), Some("fosstodon.org".to_string()));
    }

    #[test]
    fn test_normalize_keeps_explicit_port() {
        assert_eq!(normalize_host("localhost:3000"), Some("localhost:3000".to_string()));
        assert_eq!(normalize_host("https://example.social:8443/x"), Some("example.social:8443".to_string()));
        assert_eq!(normalize_host("https://example.social:443/x"), Some("example.social".to_string()));
    }

    #[test]
    fn test_typed_host_with_port_is_rejected() {
        let host = normalize_host("Example.Social:8443").unwrap();
        assert_eq!(host, "example.social:8443");
        assert!(!looks_like_host(&host));
    }

    #[test]
    fn test_normalize_invalid() {
        assert_eq!(normalize_host(""), None);
        assert_eq!(normalize_host("   "), None);
        assert_eq!(normalize_host("not a host!!"), None);
        assert_eq!(normalize_host("https://"), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "MASTODON.social",
            "https://Foo.Bar/share?x=1",
            "hachyderm.io/@someone",
            "http://infosec.exchange",
            "localhost:3000",
        ];

        for input in inputs {
            let once = normalize_host(input).unwrap();
            let twice = normalize_host(&format!("https://{}", once)).unwrap();
            assert_eq!(once, twice, "normalizing {} twice changed it", input);
            assert_eq!(normalize_host(&once), Some(once.clone()));
        }
    }

    #[test]
    fn test_looks_like_host() {
        assert!(looks_like_host("mastodon.social"));
        assert!(looks_like_host("infosec.exchange"));
        assert!(looks_like_host("social.example.co.uk"));
        assert!(looks_like_host("Example.ORG"));
    }

    #[test]
    fn test_looks_like_host_rejects_bad_shapes() {
        assert!(!looks_like_host("localhost"));
        assert!(!looks_like_host("example.c"));
        assert!(!looks_like_host("example.123"));
        assert!(!looks_like_host("127.0.0.1"));
        assert!(!looks_like_host("example.social:8443"));
        assert!(!looks_like_host(""));
    }
}
