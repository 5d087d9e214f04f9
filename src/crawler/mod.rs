//! Crawler module: the concurrent crawl engine
//!
//! This module contains the core of Spinneret:
//! - the frontier and its atomic reservation protocol
//! - the fixed-size worker pool and termination detection
//! - HTTP fetching behind a trait seam
//! - HTML link extraction
//! - the per-crawl result store

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod results;

pub use coordinator::Spider;
pub use fetcher::{build_http_client, FetchOutcome, Fetcher, HttpFetcher};
pub use frontier::{Dispatch, Frontier};
pub use parser::extract_links;
pub use results::{CrawlRecord, ResultStore};

use crate::config::Settings;
use crate::SpinneretError;
use std::collections::BTreeMap;

/// Runs a complete crawl with the given settings
///
/// Convenience wrapper: builds a [`Spider`], runs it to completion, writes
/// the JSON output file if one is configured, and returns the results.
///
/// # Example
///
/// ```no_run
/// use spinneret::config::Settings;
/// use spinneret::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = Settings::new("https://example.com/").max_links(10);
/// let results = crawl(settings).await?;
/// println!("Visited {} pages", results.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(settings: Settings) -> Result<BTreeMap<String, CrawlRecord>, SpinneretError> {
    let spider = Spider::new(settings)?;
    let results = spider.start().await?;
    spider.save_results(&results)?;
    Ok(results)
}
