//! URL handling module for Spinneret
//!
//! This module resolves raw hrefs against their page's base URL, normalizes
//! the result for deduplication, and applies the configured link scope
//! policy (regex and internal/external host restrictions).

mod resolve;

pub use resolve::resolve_link;

use crate::config::Settings;
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Scope policy applied to every discovered link before it is recorded
/// or fed back into the frontier
///
/// Built once from the settings at crawl start; shared read-only by all
/// workers.
#[derive(Debug)]
pub struct LinkFilter {
    url_regex: Option<Regex>,
    root_host: Option<String>,
    internal_only: bool,
    external_only: bool,
}

impl LinkFilter {
    /// Builds the filter from validated settings and the parsed root URL
    pub fn new(settings: &Settings, root: &Url) -> Result<Self, ConfigError> {
        let url_regex = settings
            .url_regex
            .as_deref()
            .map(Regex::new)
            .transpose()?;

        Ok(Self {
            url_regex,
            root_host: root.host_str().map(str::to_string),
            internal_only: settings.internal_links_only,
            external_only: settings.external_links_only,
        })
    }

    /// Returns true if a resolved link passes the configured scope policy
    pub fn accepts(&self, url: &Url) -> bool {
        if let Some(re) = &self.url_regex {
            if !re.is_match(url.as_str()) {
                tracing::debug!("Skipping, URL didn't match regex: {}", url);
                return false;
            }
        }

        let same_host = url.host_str() == self.root_host.as_deref();

        if self.internal_only && !same_host {
            tracing::debug!("Skipping external link: {}", url);
            return false;
        }

        if self.external_only && same_host {
            tracing::debug!("Skipping internal link: {}", url);
            return false;
        }

        true
    }
}
