//! Crawlmaster main entry point
//!
//! Command-line interface for running a set of budget-bounded crawl jobs.

use anyhow::Context;
use clap::Parser;
use crawlmaster::config::load_config;
use crawlmaster::job::run_jobs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawlmaster: budget-bounded multi-site crawling
///
/// Runs one worker pool per configured job, each crawling its site until the
/// per-job page budget is reached, with a durable frontier file per job.
#[derive(Parser, Debug)]
#[command(name = "crawlmaster")]
#[command(version)]
#[command(about = "Budget-bounded multi-site crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    tracing::info!("Starting {} crawl job(s)", config.jobs.len());
    run_jobs(&config).await.context("crawl run failed")?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawlmaster=info,warn"),
            1 => EnvFilter::new("crawlmaster=debug,info"),
            2 => EnvFilter::new("crawlmaster=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints the validated configuration without starting any job
fn print_dry_run(config: &crawlmaster::Config) {
    println!("=== Crawlmaster Dry Run ===\n");

    println!("Crawler:");
    println!("  Queue capacity: {}", config.crawler.queue_capacity);
    println!("  User agent: {}", config.crawler.user_agent);
    println!("  Min page bytes: {}", config.crawler.min_page_bytes);

    println!("\nOutput root: {}", config.output.root_dir);

    println!("\nJobs ({}):", config.jobs.len());
    for job in &config.jobs {
        println!(
            "  - {}: {} (budget {} pages, {} workers{}{})",
            job.name,
            job.homepage,
            job.max_pages,
            job.workers,
            job.delay_ms
                .map(|d| format!(", {}ms delay", d))
                .unwrap_or_default(),
            job.language
                .as_deref()
                .map(|l| format!(", language {}", l))
                .unwrap_or_default(),
        );
    }

    println!("\n✓ Configuration is valid");
}
