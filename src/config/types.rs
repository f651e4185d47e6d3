use serde::Deserialize;

/// Main configuration structure for crawlmaster
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    #[serde(rename = "job", default)]
    pub jobs: Vec<JobConfig>,
}

/// Process-wide crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Capacity of each job's in-memory URL queue
    #[serde(rename = "queue-capacity", default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Stored pages smaller than this are removed by end-of-run cleanup (bytes)
    #[serde(rename = "min-page-bytes", default = "default_min_page_bytes")]
    pub min_page_bytes: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            user_agent: default_user_agent(),
            min_page_bytes: default_min_page_bytes(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory holding one subdirectory per job (frontier file, pages)
    #[serde(rename = "root-dir")]
    pub root_dir: String,
}

/// One crawl job: a site crawled up to a page budget by a pool of workers
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Job name, used for the per-job artifact directory and log lines
    pub name: String,

    /// Homepage URL the seed and pagination heuristics derive from
    pub homepage: String,

    /// Page budget: the job stops once this many pages were processed
    #[serde(rename = "max-pages")]
    pub max_pages: u64,

    /// Number of concurrent workers for this job
    pub workers: usize,

    /// Optional politeness delay after each processed page (milliseconds)
    #[serde(rename = "delay-ms", default)]
    pub delay_ms: Option<u64>,

    /// Optional language hint, sent as Accept-Language
    #[serde(default)]
    pub language: Option<String>,
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_user_agent() -> String {
    format!("crawlmaster/{}", env!("CARGO_PKG_VERSION"))
}

fn default_min_page_bytes() -> u64 {
    512
}
