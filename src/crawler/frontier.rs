//! Crawl frontier: the pending-work queue plus deduplication set
//!
//! The frontier is the single synchronization domain of the crawl. The
//! visited-or-reserved set, the pending queue, the reserved count, the
//! in-flight count, and the shutdown flag all live behind one mutex, because
//! the two decisions with real correctness risk both need an atomic view of
//! several of them at once:
//!
//! - admission (`try_reserve`) must check set membership and the quota and
//!   insert in one step, or two workers discovering the same URL could both
//!   visit it, or the quota could be exceeded under load;
//! - termination (`next` / `complete`) must observe queue-empty and
//!   in-flight-zero jointly, or a worker could declare the crawl done while
//!   a sibling is mid-fetch and about to enqueue more work.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use url::Url;

/// How long an idle worker sleeps before re-polling the frontier
///
/// Idle workers are also woken early by `enqueue` and `complete`, so this
/// only bounds the wait when a notification is missed.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// What the frontier hands a polling worker
#[derive(Debug)]
pub enum Dispatch {
    /// A reserved URL to visit; the caller is now in flight and must call
    /// [`Frontier::complete`] exactly once, whatever the fetch outcome
    Job(Url),
    /// Nothing queued right now, but another worker's in-flight fetch may
    /// still produce work; wait briefly and poll again
    Idle,
    /// Queue empty and nothing in flight; the crawl is over
    Finished,
}

struct Inner {
    /// Every URL ever admitted, completed or still in flight
    seen: HashSet<Url>,
    /// Admitted URLs awaiting dispatch, first-discovered-first-served
    pending: VecDeque<Url>,
    /// Count of admitted URLs; never exceeds the quota
    reserved: usize,
    /// Workers currently between a dequeue and its `complete` call
    in_flight: usize,
    /// Set once termination is detected; every poll afterwards is `Finished`
    shutdown: bool,
}

/// The shared frontier draining into the worker pool
pub struct Frontier {
    max_links: usize,
    inner: Mutex<Inner>,
    wake: Notify,
}

impl Frontier {
    /// Creates an empty frontier with the given visit quota
    pub fn new(max_links: usize) -> Self {
        Self {
            max_links,
            inner: Mutex::new(Inner {
                seen: HashSet::new(),
                pending: VecDeque::new(),
                reserved: 0,
                in_flight: 0,
                shutdown: false,
            }),
            wake: Notify::new(),
        }
    }

    /// Atomically claims a URL against the dedup set and the quota
    ///
    /// This is the sole admission point. Returns true exactly once per URL,
    /// and never once `max_links` URLs have been admitted; the caller must
    /// discard the URL on false. Total: duplicates and quota exhaustion are
    /// expressed in the return value, not as errors.
    pub fn try_reserve(&self, url: &Url) -> bool {
        let mut inner = self.inner.lock().unwrap();

        if inner.reserved >= self.max_links || inner.seen.contains(url) {
            return false;
        }

        inner.seen.insert(url.clone());
        inner.reserved += 1;
        true
    }

    /// Appends a just-reserved URL to the pending queue
    ///
    /// Only ever called with a URL for which `try_reserve` returned true.
    pub fn enqueue(&self, url: Url) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.pending.push_back(url);
        }
        self.wake.notify_one();
    }

    /// Polls for the next unit of work
    ///
    /// Dequeuing and marking the worker in flight happen in the same
    /// critical section, so no other worker can observe an empty queue with
    /// this job unaccounted for. The queue-empty + in-flight-zero check that
    /// ends the crawl happens under the same lock.
    pub fn next(&self) -> Dispatch {
        let mut inner = self.inner.lock().unwrap();

        if inner.shutdown {
            return Dispatch::Finished;
        }

        if let Some(url) = inner.pending.pop_front() {
            inner.in_flight += 1;
            return Dispatch::Job(url);
        }

        if inner.in_flight == 0 {
            inner.shutdown = true;
            drop(inner);
            self.wake.notify_waiters();
            return Dispatch::Finished;
        }

        Dispatch::Idle
    }

    /// Marks one dispatched job as finished
    ///
    /// If this was the last in-flight job and nothing new was enqueued, the
    /// crawl is over; idle workers are woken either way so they re-poll.
    pub fn complete(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.in_flight -= 1;
            if inner.pending.is_empty() && inner.in_flight == 0 {
                inner.shutdown = true;
            }
        }
        self.wake.notify_waiters();
    }

    /// Parks an idle worker until new work may exist
    ///
    /// Bounded: returns after [`IDLE_POLL`] even if no wakeup arrives, so a
    /// missed notification can never strand a worker.
    pub async fn wait_for_work(&self) {
        let _ = tokio::time::timeout(IDLE_POLL, self.wake.notified()).await;
    }

    /// Pending queue length, for diagnostics only
    pub fn remaining(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Number of URLs admitted so far
    pub fn reserved(&self) -> usize {
        self.inner.lock().unwrap().reserved
    }
}
