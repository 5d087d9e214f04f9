//! HTML link extraction
//!
//! Turns a fetched page body into the sequence of absolute, normalized URLs
//! it links to. Anything that cannot be parsed degrades to zero links; a
//! page of broken markup is not an error.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// Resolves each `<a href>` against `base_url` via [`resolve_link`], which
/// drops non-fetchable schemes, fragments-only anchors, and malformed hrefs.
/// Order matches document order. Duplicate hrefs are kept here; per-page
/// dedup is the caller's policy.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    // The selector is a compile-time constant string; a parse failure would
    // be a bug, so degrade to no links rather than plumbing an error
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("http://a.test/dir/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_and_relative() {
        let html = r#"<html><body>
            <a href="http://b.test/x">absolute</a>
            <a href="/top">root relative</a>
            <a href="child">path relative</a>
        </body></html>"#;
        let links = extract_links(html, &base_url());
        let strs: Vec<&str> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            strs,
            ["http://b.test/x", "http://a.test/top", "http://a.test/dir/child"]
        );
    }

    #[test]
    fn test_document_order_preserved() {
        let html = r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#;
        let links = extract_links(html, &base_url());
        let paths: Vec<&str> = links.iter().map(Url::path).collect();
        assert_eq!(paths, ["/1", "/2", "/3"]);
    }

    #[test]
    fn test_invalid_schemes_excluded() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">js</a>
            <a href="mailto:a@b.test">mail</a>
            <a href="#section">anchor</a>
            <a href="/real">real</a>
        </body></html>"##;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "http://a.test/real");
    }

    #[test]
    fn test_anchors_without_href_ignored() {
        let html = r#"<a name="marker">no href</a><a href="/x">x</a>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_empty_and_broken_markup() {
        assert!(extract_links("", &base_url()).is_empty());
        assert!(extract_links("plain text, no markup", &base_url()).is_empty());
        // Unclosed tags still parse; the link survives
        let links = extract_links(r#"<body><a href="/x">x"#, &base_url());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_duplicate_hrefs_kept() {
        let html = r#"<a href="/x">1</a><a href="/x">2</a>"#;
        assert_eq!(extract_links(html, &base_url()).len(), 2);
    }
}
