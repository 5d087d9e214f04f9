//! Crawl coordinator and worker pool
//!
//! The [`Spider`] owns the frontier, the result store, and the fetcher for
//! the duration of one crawl: it seeds the frontier with the root URL,
//! spawns a fixed number of worker tasks, blocks until every worker has
//! observed termination, and hands back the final result snapshot. No
//! component outlives the Spider that created it, and nothing is shared
//! across crawls.

use crate::config::{validate, Settings};
use crate::crawler::fetcher::{FetchOutcome, Fetcher, HttpFetcher};
use crate::crawler::frontier::{Dispatch, Frontier};
use crate::crawler::parser::extract_links;
use crate::crawler::results::{CrawlRecord, ResultStore};
use crate::url::LinkFilter;
use crate::SpinneretError;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Main crawler structure
///
/// Construct with [`Spider::new`], run with [`Spider::start`].
pub struct Spider {
    settings: Settings,
    root: Url,
    frontier: Arc<Frontier>,
    store: Arc<ResultStore>,
    filter: Arc<LinkFilter>,
    fetcher: Arc<dyn Fetcher>,
}

impl Spider {
    /// Creates a spider with the production HTTP fetcher
    ///
    /// Fails fast on invalid settings; no worker starts and no request is
    /// sent unless validation passes.
    pub fn new(settings: Settings) -> Result<Self, SpinneretError> {
        let fetcher = Arc::new(HttpFetcher::new()?);
        Self::with_fetcher(settings, fetcher)
    }

    /// Creates a spider with a caller-supplied fetcher
    ///
    /// The seam tests use to substitute a scripted transport.
    pub fn with_fetcher(
        settings: Settings,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, SpinneretError> {
        validate(&settings)?;

        let mut root = Url::parse(&settings.root_url)?;
        // Normalize the seed the same way discovered links are normalized,
        // so the root cannot be re-admitted under a fragment/query variant
        root.set_fragment(None);
        root.set_query(None);

        let filter = Arc::new(LinkFilter::new(&settings, &root)?);
        let frontier = Arc::new(Frontier::new(settings.max_links));

        Ok(Self {
            settings,
            root,
            frontier,
            store: Arc::new(ResultStore::new()),
            filter,
            fetcher,
        })
    }

    /// Runs the crawl to completion and returns the final results
    ///
    /// Blocks until the frontier is exhausted with no fetch in flight, or
    /// the visit quota has been reached and the queue has drained. Per-URL
    /// failures are absorbed by the workers; this only errors if a worker
    /// task itself dies.
    pub async fn start(&self) -> Result<BTreeMap<String, CrawlRecord>, SpinneretError> {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl from {} (quota {}, {} workers)",
            self.root,
            self.settings.max_links,
            self.settings.max_workers
        );

        // The seed goes through the same admission path as every other URL.
        // max_links > 0 and the set is empty, so this always succeeds.
        if self.frontier.try_reserve(&self.root) {
            self.frontier.enqueue(self.root.clone());
        }

        let mut workers = Vec::with_capacity(self.settings.max_workers);
        for id in 0..self.settings.max_workers {
            let worker = Worker {
                id,
                frontier: self.frontier.clone(),
                store: self.store.clone(),
                filter: self.filter.clone(),
                fetcher: self.fetcher.clone(),
                delay: Duration::from_secs_f64(self.settings.delay),
                include_body: self.settings.include_body,
            };
            workers.push(tokio::spawn(worker.run()));
        }

        for handle in workers {
            handle
                .await
                .map_err(|e| SpinneretError::WorkerPanic(e.to_string()))?;
        }

        tracing::info!(
            "Crawl finished: {} pages visited, {} URLs reserved, in {:?}",
            self.store.len(),
            self.frontier.reserved(),
            start_time.elapsed()
        );

        Ok(self.store.snapshot())
    }

    /// Writes results to the configured output file, if any
    pub fn save_results(
        &self,
        results: &BTreeMap<String, CrawlRecord>,
    ) -> Result<(), SpinneretError> {
        if let Some(path) = &self.settings.save_to_file {
            crate::output::write_json(path, results)?;
            tracing::info!("Results written to {}", path.display());
        }
        Ok(())
    }

    /// The crawl settings this spider was built with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// One concurrent unit of execution draining the frontier
struct Worker {
    id: usize,
    frontier: Arc<Frontier>,
    store: Arc<ResultStore>,
    filter: Arc<LinkFilter>,
    fetcher: Arc<dyn Fetcher>,
    delay: Duration,
    include_body: bool,
}

impl Worker {
    async fn run(self) {
        loop {
            match self.frontier.next() {
                Dispatch::Job(url) => {
                    self.visit(&url).await;
                    self.frontier.complete();
                }
                Dispatch::Idle => self.frontier.wait_for_work().await,
                Dispatch::Finished => break,
            }
        }
        tracing::debug!("Worker {} exiting", self.id);
    }

    /// Fetches one reserved URL and feeds its links back into the frontier
    ///
    /// Every failure path returns without recording anything; a single
    /// page's failure never aborts the crawl, and its reservation stays
    /// consumed.
    async fn visit(&self, url: &Url) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!("Crawling: {}", url);
        let body = match self.fetcher.fetch(url).await {
            FetchOutcome::Success { body } => body,
            FetchOutcome::HttpError { status } => {
                tracing::warn!("HTTP {} for {}", status, url);
                return;
            }
            FetchOutcome::NetworkError { error } => {
                tracing::warn!("Unable to fetch {}: {}", url, error);
                return;
            }
        };

        let mut discovered = Vec::new();
        for link in extract_links(&body, url) {
            if !self.filter.accepts(&link) {
                continue;
            }

            let link_str = link.to_string();
            // Same href appearing twice on one page is recorded once
            if discovered.contains(&link_str) {
                continue;
            }
            discovered.push(link_str);
            tracing::debug!("Link found: {}", link);

            if self.frontier.try_reserve(&link) {
                self.frontier.enqueue(link);
            }
        }

        let record = if self.include_body {
            CrawlRecord::with_body(discovered, body)
        } else {
            CrawlRecord::new(discovered)
        };
        self.store.record(url, record);
    }
}
