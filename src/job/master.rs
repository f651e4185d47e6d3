use crate::config::JobConfig;
use crate::frontier::{FrontierStore, UrlQueue};
use crate::job::progress::{JobPhase, PageCounter, PhaseCell};
use crate::job::refill::RefillPolicy;
use crate::job::worker::{run_worker, WorkerContext};
use crate::spider::PageProcessor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Monitoring cadence of the orchestrator loop
const MONITOR_INTERVAL: Duration = Duration::from_secs(5);

/// How long a worker blocks on an empty queue before reporting starvation
const DEQUEUE_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-job orchestrator
///
/// Owns one frontier store, one bounded queue, one worker pool, and the
/// monitoring loop that drives refills and observes termination. The
/// lifecycle is `Starting -> Running -> Draining -> Done`:
///
/// - `Starting`: bulk-load the stored frontier into the queue (best-effort; a
///   full queue truncates the load silently) and spawn the worker pool
/// - `Running`: on a fixed cadence, report progress and run a refill cycle
///   whenever less than double the remaining work is buffered; a starved
///   worker wakes the monitor early
/// - `Draining -> Done`: entered when the monitor observes the progress
///   counter at or past the budget; workers self-terminate on the same
///   polled condition, so no join or shutdown signal is needed and any
///   outstanding work is abandoned
pub struct JobMaster {
    job: JobConfig,
    store: FrontierStore,
    queue: Arc<UrlQueue>,
    progress: Arc<PageCounter>,
    processor: Arc<dyn PageProcessor>,
    refill: RefillPolicy,
    phase: Arc<PhaseCell>,
    refill_wanted: Arc<Notify>,
    monitor_interval: Duration,
    dequeue_timeout: Duration,
}

impl JobMaster {
    /// Creates an orchestrator for one job
    ///
    /// # Arguments
    ///
    /// * `job` - The job configuration
    /// * `store` - Frontier store backing this job
    /// * `processor` - Fetch collaborator invoked per URL
    /// * `progress` - Shared page counter (incremented by the processor)
    /// * `queue_capacity` - Capacity of the in-memory dispatch queue
    pub fn new(
        job: JobConfig,
        store: FrontierStore,
        processor: Arc<dyn PageProcessor>,
        progress: Arc<PageCounter>,
        queue_capacity: usize,
    ) -> Self {
        let refill = RefillPolicy::new(&job);
        Self {
            job,
            store,
            queue: Arc::new(UrlQueue::new(queue_capacity)),
            progress,
            processor,
            refill,
            phase: Arc::new(PhaseCell::new()),
            refill_wanted: Arc::new(Notify::new()),
            monitor_interval: MONITOR_INTERVAL,
            dequeue_timeout: DEQUEUE_TIMEOUT,
        }
    }

    /// Overrides the monitor cadence and worker dequeue timeout
    ///
    /// Production uses the defaults; tests shrink both to keep scenarios
    /// fast.
    pub fn with_timing(mut self, monitor_interval: Duration, dequeue_timeout: Duration) -> Self {
        self.monitor_interval = monitor_interval;
        self.dequeue_timeout = dequeue_timeout;
        self
    }

    /// Spawns the orchestrator as a detached task, returning its handle
    pub fn spawn(self) -> JobHandle {
        let name = self.job.name.clone();
        let budget = self.job.max_pages;
        let progress = self.progress.clone();
        let phase = self.phase.clone();
        let task = tokio::spawn(self.run());

        JobHandle {
            name,
            budget,
            progress,
            phase,
            task,
        }
    }

    /// Runs the job to completion
    pub async fn run(self) {
        tracing::info!(
            "[{}] starting: budget {} pages, {} workers",
            self.job.name,
            self.job.max_pages,
            self.job.workers
        );

        // Bulk-load the stored frontier; truncation on a full queue is silent
        let initial = self.store.load_or_empty();
        let mut loaded = 0;
        for url in initial {
            if !self.queue.try_push(url) {
                break;
            }
            loaded += 1;
        }
        tracing::info!("[{}] loaded {} URLs from frontier", self.job.name, loaded);

        let ctx = Arc::new(WorkerContext {
            job_name: self.job.name.clone(),
            budget: self.job.max_pages,
            queue: self.queue.clone(),
            progress: self.progress.clone(),
            processor: self.processor.clone(),
            refill_wanted: self.refill_wanted.clone(),
            dequeue_timeout: self.dequeue_timeout,
            delay: self.job.delay_ms.map(Duration::from_millis),
        });

        // Workers are daemon-like: handles are dropped and each worker exits
        // on its own budget check
        for id in 0..self.job.workers {
            tokio::spawn(run_worker(id, ctx.clone()));
        }

        self.phase.set(JobPhase::Running);
        self.monitor().await;

        self.phase.set(JobPhase::Draining);
        tracing::info!(
            "[{}] budget reached: {}/{} pages, {} still queued",
            self.job.name,
            self.progress.read(),
            self.job.max_pages,
            self.queue.len()
        );
        self.phase.set(JobPhase::Done);
    }

    /// Monitoring loop: progress reporting, readahead refills, termination
    ///
    /// Returns once the progress counter is observed at or past the budget.
    /// Termination is polling-based on both sides; a final in-flight fetch
    /// per worker may still complete after the budget check.
    async fn monitor(&self) {
        let budget = self.job.max_pages;

        loop {
            let progress = self.progress.read();
            if progress >= budget {
                return;
            }

            let remaining = budget - progress;
            let queued = self.queue.len();
            tracing::info!(
                "[{}] progress: {}/{} | queue: {}",
                self.job.name,
                progress,
                budget,
                queued
            );

            // Keep at least double the remaining work buffered
            if (queued as u64) < remaining.saturating_mul(2) {
                self.refill.refill(&self.store, &self.queue);
            }

            // Sleep out the cadence, but wake early when a worker starves
            if tokio::time::timeout(self.monitor_interval, self.refill_wanted.notified())
                .await
                .is_ok()
            {
                self.refill.refill(&self.store, &self.queue);
            }
        }
    }
}

/// Handle to a spawned job, polled by the run driver
pub struct JobHandle {
    pub name: String,
    pub budget: u64,
    progress: Arc<PageCounter>,
    phase: Arc<PhaseCell>,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Current page count for the job
    pub fn progress(&self) -> u64 {
        self.progress.read()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> JobPhase {
        self.phase.get()
    }

    /// Whether the job has reached its budget
    pub fn is_done(&self) -> bool {
        self.progress.read() >= self.budget
    }

    /// Waits for the orchestrator task itself to finish
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!("[{}] orchestrator task failed: {}", self.name, e);
        }
    }
}
