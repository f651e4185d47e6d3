use crate::config::JobConfig;
use crate::frontier::{FrontierStore, UrlQueue};
use std::collections::HashSet;

/// Well-known entry paths appended to the homepage when the frontier is
/// critically small
pub const SEED_PATHS: [&str; 3] = ["/hot", "/explore", "/roundtable"];

/// Literal substring of the homepage that enables pagination expansion
const PAGINATION_MARKER: &str = "/page=";

/// Number of paginated URLs generated per expansion
const PAGINATION_BATCH: usize = 5;

/// Replenishes a job's queue from the durable frontier, expanding the
/// frontier heuristically when it runs low
///
/// A refill cycle runs against a fresh snapshot of the frontier file,
/// independent of whatever is already queued in memory:
///
/// 1. load the frontier (IO failure degrades to an empty set)
/// 2. seed expansion if the set holds less than half the budget
/// 3. pagination expansion if the homepage carries the `/page=` marker
/// 4. persist the merged set (IO failure is logged and retried next cycle)
/// 5. enqueue members until the queue reports full
#[derive(Debug, Clone)]
pub struct RefillPolicy {
    job_name: String,
    homepage: String,
    budget: u64,
}

impl RefillPolicy {
    pub fn new(job: &JobConfig) -> Self {
        Self {
            job_name: job.name.clone(),
            homepage: job.homepage.clone(),
            budget: job.max_pages,
        }
    }

    /// Applies seed and pagination expansion to a frontier snapshot
    ///
    /// Returns whether anything was added. The pagination index range starts
    /// at the set size measured after the seed step; the original heuristic
    /// keys the page index off frontier size rather than a real page cursor,
    /// and that behavior is kept as-is.
    pub fn expand(&self, frontier: &mut HashSet<String>) -> bool {
        let before = frontier.len();

        if (frontier.len() as u64) < self.budget / 2 {
            tracing::debug!("[{}] frontier critically small, adding seed paths", self.job_name);
            for path in SEED_PATHS {
                frontier.insert(format!("{}{}", self.homepage, path));
            }
        }

        if self.homepage.contains(PAGINATION_MARKER) {
            let start = frontier.len();
            for i in start..start + PAGINATION_BATCH {
                frontier.insert(format!("{}?page={}", self.homepage, i));
            }
        }

        frontier.len() > before
    }

    /// Runs one refill cycle against the store and queue
    pub fn refill(&self, store: &FrontierStore, queue: &UrlQueue) {
        let mut frontier = store.load_or_empty();

        self.expand(&mut frontier);

        // Persist the expansion so it survives a restart; a failed write
        // leaves the file as-is and the next cycle retries
        if let Err(e) = store.save(&frontier) {
            tracing::warn!(
                "[{}] failed to persist frontier ({} URLs): {}",
                self.job_name,
                frontier.len(),
                e
            );
        }

        let mut loaded = 0;
        for url in frontier {
            if !queue.try_push(url) {
                break;
            }
            loaded += 1;
        }

        tracing::debug!("[{}] refill loaded {} URLs into queue", self.job_name, loaded);
    }
}
