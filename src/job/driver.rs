use crate::cleanup::{Cleanup, SmallFileCleaner};
use crate::config::Config;
use crate::frontier::FrontierStore;
use crate::job::master::{JobHandle, JobMaster};
use crate::job::progress::PageCounter;
use crate::spider::{build_http_client, Spider};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Cadence at which the driver reports overall status
const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Directory holding one job's artifacts
pub(crate) fn job_dir(root: &Path, job_name: &str) -> PathBuf {
    root.join(job_name)
}

/// Path of one job's frontier file
pub(crate) fn frontier_path(root: &Path, job_name: &str) -> PathBuf {
    job_dir(root, job_name).join("frontier.txt")
}

/// Directory holding one job's stored pages
pub(crate) fn pages_dir(root: &Path, job_name: &str) -> PathBuf {
    job_dir(root, job_name).join("pages")
}

/// Starts every configured job and runs them all to their budgets
///
/// One orchestrator is spawned per job (fire-and-forget). The driver then
/// polls all progress counters until every job has reached its budget or the
/// process is interrupted, and finally invokes cleanup once per job,
/// unconditionally — including for jobs that never finished.
pub async fn run_jobs(config: &Config) -> Result<()> {
    let client = build_http_client(&config.crawler.user_agent)?;
    let root = Path::new(&config.output.root_dir);

    let mut handles = Vec::with_capacity(config.jobs.len());
    for job in &config.jobs {
        let store = FrontierStore::new(frontier_path(root, &job.name));
        let progress = Arc::new(PageCounter::new());
        let spider = Spider::new(
            job.clone(),
            client.clone(),
            store.clone(),
            pages_dir(root, &job.name),
            progress.clone(),
        )?;

        let master = JobMaster::new(
            job.clone(),
            store,
            Arc::new(spider),
            progress,
            config.crawler.queue_capacity,
        );
        handles.push(master.spawn());
    }

    let cleaner = SmallFileCleaner::new(root, config.crawler.min_page_bytes);
    drive(handles, &cleaner, STATUS_INTERVAL).await;
    Ok(())
}

/// Polls the given jobs until all reach their budgets (or Ctrl-C), then runs
/// cleanup once per job
///
/// Cleanup is a best-effort terminal step: it runs for every job even on the
/// interrupted-exit path, and its errors are logged, never propagated.
pub async fn drive(handles: Vec<JobHandle>, cleaner: &dyn Cleanup, poll_interval: Duration) {
    loop {
        if handles.iter().all(JobHandle::is_done) {
            tracing::info!("All jobs reached their budgets");
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {
                tracing::info!("=== Current status ===");
                for handle in &handles {
                    tracing::info!(
                        "{}: {}/{} pages",
                        handle.name,
                        handle.progress(),
                        handle.budget
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Interrupted, abandoning unfinished jobs");
                break;
            }
        }
    }

    tracing::info!("=== Starting cleanup ===");
    for handle in &handles {
        match cleaner.cleanup(&handle.name) {
            Ok(()) => tracing::info!("Cleanup completed for {}", handle.name),
            Err(e) => tracing::warn!("Cleanup failed for {}: {}", handle.name, e),
        }
    }
}
