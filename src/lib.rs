//! Crawlmaster: bounded-budget crawl orchestration
//!
//! This crate coordinates one or more independent crawl jobs. Each job owns a
//! durable frontier of known URLs, a bounded in-memory queue feeding a pool of
//! concurrent workers, and a refill policy that replenishes the queue from the
//! frontier (expanding it heuristically when it runs low). A job stops once
//! its per-site page budget is reached.

pub mod cleanup;
pub mod config;
pub mod frontier;
pub mod job;
pub mod spider;

use thiserror::Error;

/// Main error type for crawlmaster operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Expected HTML for {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawlmaster operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, JobConfig};
pub use frontier::{FrontierStore, UrlQueue};
pub use job::{JobHandle, JobMaster, JobPhase, PageCounter};
pub use spider::{PageProcessor, Spider};
