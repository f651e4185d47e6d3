use crate::frontier::UrlQueue;
use crate::job::progress::PageCounter;
use crate::spider::PageProcessor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Shared state handed to every worker in a job's pool
pub(crate) struct WorkerContext {
    pub job_name: String,
    pub budget: u64,
    pub queue: Arc<UrlQueue>,
    pub progress: Arc<PageCounter>,
    pub processor: Arc<dyn PageProcessor>,
    /// Woken when a worker finds the queue empty; the master's monitor reacts
    /// by running a refill cycle (workers never touch the frontier file)
    pub refill_wanted: Arc<Notify>,
    pub dequeue_timeout: Duration,
    pub delay: Option<Duration>,
}

/// One worker's dispatch loop
///
/// Loops until the shared progress counter reaches the budget: dequeue with a
/// timeout, hand the URL to the fetch collaborator, and on starvation signal
/// the master instead of terminating (an empty queue is transient, not
/// terminal). A collaborator error consumes the URL with no retry; the
/// failure is logged and cannot kill the worker.
pub(crate) async fn run_worker(id: usize, ctx: Arc<WorkerContext>) {
    while ctx.progress.read() < ctx.budget {
        match ctx.queue.pop(ctx.dequeue_timeout).await {
            Some(url) => {
                if let Err(e) = ctx.processor.process(id, &url).await {
                    tracing::warn!(
                        "[{}] worker {} dropped {}: {}",
                        ctx.job_name,
                        id,
                        url,
                        e
                    );
                }

                if let Some(delay) = ctx.delay {
                    tokio::time::sleep(delay).await;
                }
            }
            None => {
                tracing::info!(
                    "[{}] worker {} found the queue empty, requesting refill",
                    ctx.job_name,
                    id
                );
                ctx.refill_wanted.notify_one();
            }
        }
    }

    tracing::debug!("[{}] worker {} finished", ctx.job_name, id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CrawlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Processor that succeeds (counting the page) unless the URL contains
    /// "fail", and records every URL it saw
    struct StubProcessor {
        progress: Arc<PageCounter>,
        seen: Mutex<Vec<String>>,
        failures: AtomicUsize,
    }

    impl StubProcessor {
        fn new(progress: Arc<PageCounter>) -> Self {
            Self {
                progress,
                seen: Mutex::new(Vec::new()),
                failures: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PageProcessor for StubProcessor {
        async fn process(&self, _worker_id: usize, url: &str) -> crate::Result<()> {
            self.seen.lock().unwrap().push(url.to_string());

            if url.contains("fail") {
                self.failures.fetch_add(1, Ordering::SeqCst);
                return Err(CrawlError::HttpStatus {
                    url: url.to_string(),
                    status: 500,
                });
            }

            self.progress.increment();
            Ok(())
        }
    }

    fn context(
        budget: u64,
        queue: Arc<UrlQueue>,
        progress: Arc<PageCounter>,
        processor: Arc<StubProcessor>,
    ) -> Arc<WorkerContext> {
        Arc::new(WorkerContext {
            job_name: "test".to_string(),
            budget,
            queue,
            progress,
            processor,
            refill_wanted: Arc::new(Notify::new()),
            dequeue_timeout: Duration::from_millis(20),
            delay: None,
        })
    }

    #[tokio::test]
    async fn test_worker_stops_at_budget() {
        let queue = Arc::new(UrlQueue::new(16));
        let progress = Arc::new(PageCounter::new());
        let processor = Arc::new(StubProcessor::new(progress.clone()));

        for i in 0..3 {
            queue.try_push(format!("https://site.test/p{}", i));
        }

        let ctx = context(3, queue.clone(), progress.clone(), processor);
        run_worker(0, ctx).await;

        assert_eq!(progress.read(), 3);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_failed_url_is_dropped_without_counting() {
        let queue = Arc::new(UrlQueue::new(16));
        let progress = Arc::new(PageCounter::new());
        let processor = Arc::new(StubProcessor::new(progress.clone()));

        queue.try_push("https://site.test/fail".to_string());
        queue.try_push("https://site.test/ok".to_string());

        let ctx = context(1, queue.clone(), progress.clone(), processor.clone());
        run_worker(0, ctx).await;

        // The failure consumed the URL: not re-enqueued, counter untouched
        assert_eq!(processor.failures.load(Ordering::SeqCst), 1);
        assert_eq!(progress.read(), 1);
        assert!(queue.is_empty());

        let seen = processor.seen.lock().unwrap();
        assert_eq!(
            seen.iter().filter(|u| u.contains("fail")).count(),
            1,
            "failed URL must be attempted exactly once"
        );
    }

    #[tokio::test]
    async fn test_starved_worker_requests_refill() {
        let queue = Arc::new(UrlQueue::new(16));
        let progress = Arc::new(PageCounter::new());
        let processor = Arc::new(StubProcessor::new(progress.clone()));
        let ctx = context(1, queue.clone(), progress.clone(), processor);

        let refill_wanted = ctx.refill_wanted.clone();
        let worker = tokio::spawn(run_worker(0, ctx));

        // The empty queue should produce a refill request within the dequeue
        // timeout
        tokio::time::timeout(Duration::from_millis(500), refill_wanted.notified())
            .await
            .expect("worker never signaled starvation");

        // Satisfy the budget so the worker exits
        progress.increment();
        queue.try_push("https://site.test/unused".to_string());
        worker.await.unwrap();
    }
}
