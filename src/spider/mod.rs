//! Spider module: the fetch-and-record collaborator
//!
//! The orchestration core never performs network or page IO itself; it hands
//! each URL to a `PageProcessor`. This module defines that seam and provides
//! the default implementation (`Spider`), which fetches a page, stores it,
//! merges discovered same-domain links back into the frontier file, and
//! increments the job's progress counter.

mod fetch;
mod links;

pub use fetch::{build_http_client, fetch_page, FetchedPage};
pub use links::{extract_domain, extract_links};

use crate::config::JobConfig;
use crate::frontier::FrontierStore;
use crate::job::PageCounter;
use crate::{ConfigError, CrawlError, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Fetch collaborator contract
///
/// `process` performs the whole fetch/parse/record for one URL. On success it
/// must increment the job's progress counter as a side effect; on failure the
/// worker logs and drops the URL with no retry, and the counter stays
/// untouched.
#[async_trait]
pub trait PageProcessor: Send + Sync {
    async fn process(&self, worker_id: usize, url: &str) -> Result<()>;
}

/// Default fetch collaborator: HTTP fetch, page storage, link discovery
pub struct Spider {
    job: JobConfig,
    client: reqwest::Client,
    store: FrontierStore,
    pages_dir: PathBuf,
    progress: Arc<PageCounter>,
    domain: String,
}

impl Spider {
    /// Creates a spider for one job
    ///
    /// Fails if the job's homepage has no extractable domain; the domain
    /// restricts which discovered links are written back to the frontier.
    pub fn new(
        job: JobConfig,
        client: reqwest::Client,
        store: FrontierStore,
        pages_dir: PathBuf,
        progress: Arc<PageCounter>,
    ) -> Result<Self> {
        let homepage = Url::parse(&job.homepage)?;
        let domain = extract_domain(&homepage).ok_or_else(|| {
            CrawlError::Config(ConfigError::InvalidUrl(format!(
                "Homepage '{}' has no host",
                job.homepage
            )))
        })?;

        Ok(Self {
            job,
            client,
            store,
            pages_dir,
            progress,
            domain,
        })
    }

    /// Writes the fetched page body plus a metadata sidecar
    ///
    /// Pages land at `<pages_dir>/<sha256(url)>.html`; the sidecar records
    /// the source URL, status, fetch time, and the job's language hint.
    fn record_page(&self, url: &str, page: &FetchedPage) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.pages_dir)?;

        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        std::fs::write(self.pages_dir.join(format!("{}.html", digest)), &page.body)?;

        let meta = format!(
            "url: {}\nstatus: {}\nfetched-at: {}\nlanguage: {}\n",
            url,
            page.status,
            chrono::Utc::now().to_rfc3339(),
            self.job.language.as_deref().unwrap_or("-"),
        );
        std::fs::write(self.pages_dir.join(format!("{}.meta", digest)), meta)
    }
}

#[async_trait]
impl PageProcessor for Spider {
    async fn process(&self, worker_id: usize, url: &str) -> Result<()> {
        tracing::debug!("[{}] worker {} fetching {}", self.job.name, worker_id, url);

        let page = fetch_page(&self.client, url, self.job.language.as_deref()).await?;

        // Discovery write-back happens before the page is counted; a failed
        // merge only costs discoveries, not the page itself
        let discovered = extract_links(&page.body, url, &self.domain);
        if !discovered.is_empty() {
            match self.store.merge(discovered) {
                Ok(added) if added > 0 => {
                    tracing::debug!("[{}] discovered {} new URLs from {}", self.job.name, added, url);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("[{}] failed to record discoveries from {}: {}", self.job.name, url, e);
                }
            }
        }

        self.record_page(url, &page)?;
        self.progress.increment();
        Ok(())
    }
}
