use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Bounded concurrency-safe queue of URLs staged for worker dispatch
///
/// Many producers and many consumers share one queue per job. The only
/// ordering contract is causal: a URL is never popped before something pushed
/// it. Capacity is fixed at construction to bound memory; a full queue makes
/// `try_push` a silent no-op rather than blocking the caller.
#[derive(Debug)]
pub struct UrlQueue {
    inner: Mutex<VecDeque<String>>,
    notify: Notify,
    capacity: usize,
}

impl UrlQueue {
    /// Creates a queue with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            capacity,
        }
    }

    /// Attempts to enqueue a URL without blocking
    ///
    /// # Returns
    ///
    /// * `true` - The URL was enqueued
    /// * `false` - The queue is at capacity; the URL was dropped (callers
    ///   treat this as a normal outcome, not an error)
    pub fn try_push(&self, url: String) -> bool {
        {
            let mut queue = self.inner.lock().unwrap();
            if queue.len() >= self.capacity {
                return false;
            }
            queue.push_back(url);
        }
        self.notify.notify_one();
        true
    }

    /// Dequeues a URL, waiting up to `timeout` for one to appear
    ///
    /// Returns `None` once the timeout elapses with nothing available, so a
    /// starved worker can react (request a refill) instead of blocking
    /// indefinitely.
    pub async fn pop(&self, timeout: Duration) -> Option<String> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(url) = {
                let mut queue = self.inner.lock().unwrap();
                let url = queue.pop_front();
                // Another consumer may be parked while items remain; pass the
                // wakeup along
                if url.is_some() && !queue.is_empty() {
                    self.notify.notify_one();
                }
                url
            } {
                return Some(url);
            }

            let remaining = deadline.checked_duration_since(Instant::now())?;
            if tokio::time::timeout(remaining, self.notify.notified())
                .await
                .is_err()
            {
                return None;
            }
        }
    }

    /// Returns the number of URLs currently queued
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
