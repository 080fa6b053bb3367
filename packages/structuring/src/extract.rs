//! URL scanning and media classification over raw capture text.
//!
//! Pure and infallible: absence of matches yields empty findings, never an
//! error. The pipeline runs this on every request, independently of which
//! enrichment strategy ends up producing the document.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Absolute http(s) URLs: scheme followed by anything that is not
    // whitespace, an angle bracket, a quote, or a closing paren.
    static ref URL_REGEX: Regex =
        Regex::new(r#"(?i)https?://[^\s<>"')]+"#).unwrap();

    // Image/video container extensions, optionally followed by a query string.
    static ref MEDIA_REGEX: Regex =
        Regex::new(r"(?i)\.(png|jpe?g|gif|svg|webp|mp4|webm|mov|avi|mkv|m4v)(\?.*)?$").unwrap();
}

/// What the scan found in one piece of raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFindings {
    /// Every absolute URL, in order of appearance.
    pub urls: Vec<String>,

    /// The subset of `urls` whose path matches the media allowlist.
    pub media_urls: Vec<String>,

    /// The first URL that is NOT media; the document's source candidate.
    pub source_url: Option<String>,
}

impl UrlFindings {
    /// True when the text contained no URLs at all.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Scan raw text for absolute URLs and classify them.
pub fn scan(text: &str) -> UrlFindings {
    let urls: Vec<String> = URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let media_urls: Vec<String> = urls
        .iter()
        .filter(|u| is_media_url(u))
        .cloned()
        .collect();

    let source_url = urls.iter().find(|u| !is_media_url(u)).cloned();

    UrlFindings {
        urls,
        media_urls,
        source_url,
    }
}

/// Whether a URL points at a known binary media file.
pub fn is_media_url(url: &str) -> bool {
    MEDIA_REGEX.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_urls_yields_empty_findings() {
        let findings = scan("plain text without any links in it");
        assert!(findings.is_empty());
        assert!(findings.media_urls.is_empty());
        assert!(findings.source_url.is_none());
    }

    #[test]
    fn test_source_is_first_non_media_url() {
        let text = "see http://example.com/pic.png and https://example.com/article \
                    plus https://other.org/page";
        let findings = scan(text);

        assert_eq!(findings.urls.len(), 3);
        assert_eq!(findings.media_urls, vec!["http://example.com/pic.png"]);
        assert_eq!(
            findings.source_url.as_deref(),
            Some("https://example.com/article")
        );
    }

    #[test]
    fn test_all_media_leaves_no_source() {
        let findings = scan("http://a.com/x.jpg http://b.com/y.MP4");
        assert_eq!(findings.media_urls.len(), 2);
        assert!(findings.source_url.is_none());
    }

    #[test]
    fn test_url_stops_at_quotes_and_brackets() {
        let findings = scan(r#"<http://example.com/a> and "http://example.com/b" done"#);
        assert_eq!(
            findings.urls,
            vec!["http://example.com/a", "http://example.com/b"]
        );
    }

    #[test]
    fn test_media_extension_with_query_string() {
        assert!(is_media_url("https://cdn.example.com/photo.jpeg?w=800"));
        assert!(is_media_url("https://cdn.example.com/clip.webm"));
        assert!(!is_media_url("https://example.com/page.html"));
        assert!(!is_media_url("https://example.com/photo.jpeg/gallery"));
    }

    #[test]
    fn test_media_extension_case_insensitive() {
        assert!(is_media_url("http://example.com/IMG.PNG"));
        assert!(is_media_url("HTTP://EXAMPLE.COM/V.MOV"));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let text = "intro http://example.com/a.png then http://example.com/page";
        assert_eq!(scan(text), scan(text));
    }
}
