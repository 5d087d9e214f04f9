//! Result store: one record per visited page
//!
//! Kept behind its own lock, independent of the frontier: there is no quota
//! invariant to protect here, only write-safety, and coupling it to the
//! frontier lock would serialize recording against admission for no reason.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use url::Url;

/// What was learned from visiting one page
///
/// Created exactly once per URL, immediately after a successful
/// fetch+extract, and never updated afterward.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CrawlRecord {
    /// Links discovered on the page, in document order, deduplicated
    /// within the page
    pub urls: Vec<String>,

    /// Raw page body, present only when `include_body` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl CrawlRecord {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls, body: None }
    }

    pub fn with_body(urls: Vec<String>, body: String) -> Self {
        Self {
            urls,
            body: Some(body),
        }
    }
}

/// Accumulates crawl records across all workers
#[derive(Debug, Default)]
pub struct ResultStore {
    records: Mutex<HashMap<String, CrawlRecord>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record for a visited URL
    ///
    /// Write-once in practice: the reservation protocol guarantees each URL
    /// is visited at most once, so no key is ever overwritten.
    pub fn record(&self, url: &Url, record: CrawlRecord) {
        let mut records = self.records.lock().unwrap();
        records.insert(url.to_string(), record);
    }

    /// Number of pages recorded so far
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }

    /// Returns a stable, read-only copy of the results
    ///
    /// Sorted by URL so serialization is deterministic. Safe to call while
    /// workers are still writing; the copy is taken under the lock.
    pub fn snapshot(&self) -> BTreeMap<String, CrawlRecord> {
        let records = self.records.lock().unwrap();
        records
            .iter()
            .map(|(url, record)| (url.clone(), record.clone()))
            .collect()
    }
}
