use url::Url;

/// Resolves a raw href against its page's base URL and normalizes it
///
/// Standard base+relative resolution: an absolute link is used as-is, a
/// scheme- or path-relative link inherits from the base. The result is
/// normalized for deduplication by stripping the fragment and the query
/// string, so two hrefs pointing at the same page compare equal.
///
/// Returns `None` for links that should never reach the frontier:
/// - empty hrefs and same-page anchors (`#section`)
/// - non-fetchable schemes: `javascript:`, `mailto:`, `tel:`, `data:`
/// - anything that fails to parse or resolves to a non-http(s) URL
///
/// Dropping is silent; a malformed href is not an error.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    // Skip non-fetchable schemes before attempting resolution
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    absolute.host_str()?;

    // Normalize for dedup: two links differing only in fragment or query
    // are the same page to this crawler
    absolute.set_fragment(None);
    absolute.set_query(None);

    Some(absolute)
}
