use serde::Deserialize;
use std::path::PathBuf;

/// Crawl settings for a single Spider instance
///
/// Immutable once validated; the coordinator takes it by value at
/// construction time and never mutates it. Defaults mirror the knobs a
/// small bounded crawl needs: one worker, half a second between fetches,
/// five pages.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The seed URL the crawl starts from (required, absolute http(s))
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Maximum number of pages a crawl may visit
    #[serde(rename = "max-links", default = "default_max_links")]
    pub max_links: usize,

    /// Number of concurrent workers draining the frontier
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: usize,

    /// Pause in seconds applied by a worker before each fetch
    #[serde(default = "default_delay")]
    pub delay: f64,

    /// Log verbosity toggle; no effect on crawl semantics
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Path the final JSON results are written to, if any
    #[serde(rename = "save-to-file", default)]
    pub save_to_file: Option<PathBuf>,

    /// Discovered links must match this pattern to be recorded or followed
    #[serde(rename = "url-regex", default)]
    pub url_regex: Option<String>,

    /// Store each visited page's raw body in its crawl record
    #[serde(rename = "include-body", default)]
    pub include_body: bool,

    /// Follow only links on the same host as the root URL
    #[serde(rename = "internal-links-only", default)]
    pub internal_links_only: bool,

    /// Follow only links on hosts other than the root URL's
    #[serde(rename = "external-links-only", default)]
    pub external_links_only: bool,
}

fn default_max_links() -> usize {
    5
}

fn default_max_workers() -> usize {
    1
}

fn default_delay() -> f64 {
    0.5
}

fn default_verbose() -> bool {
    true
}

impl Settings {
    /// Creates settings with defaults for everything but the root URL
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            max_links: default_max_links(),
            max_workers: default_max_workers(),
            delay: default_delay(),
            verbose: default_verbose(),
            save_to_file: None,
            url_regex: None,
            include_body: false,
            internal_links_only: false,
            external_links_only: false,
        }
    }

    /// Sets the visit quota
    pub fn max_links(mut self, max_links: usize) -> Self {
        self.max_links = max_links;
        self
    }

    /// Sets the worker count
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Sets the per-fetch delay in seconds
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the JSON output path
    pub fn save_to_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_to_file = Some(path.into());
        self
    }

    /// Restricts discovered links to ones matching `pattern`
    pub fn url_regex(mut self, pattern: impl Into<String>) -> Self {
        self.url_regex = Some(pattern.into());
        self
    }

    /// Stores page bodies in crawl records
    pub fn include_body(mut self, include: bool) -> Self {
        self.include_body = include;
        self
    }

    /// Follows only same-host links
    pub fn internal_links_only(mut self, internal: bool) -> Self {
        self.internal_links_only = internal;
        self
    }

    /// Follows only cross-host links
    pub fn external_links_only(mut self, external: bool) -> Self {
        self.external_links_only = external;
        self
    }
}
