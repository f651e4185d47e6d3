use crate::config::types::{Config, CrawlerConfig, JobConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_jobs(&config.jobs)?;
    Ok(())
}

/// Validates process-wide crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.queue_capacity < 1 {
        return Err(ConfigError::Validation(
            "queue_capacity must be >= 1".to_string(),
        ));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.root_dir.is_empty() {
        return Err(ConfigError::Validation(
            "root_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates all job entries: at least one job, unique names, sane limits
fn validate_jobs(jobs: &[JobConfig]) -> Result<(), ConfigError> {
    if jobs.is_empty() {
        return Err(ConfigError::Validation(
            "At least one [[job]] must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for job in jobs {
        validate_job(job)?;

        if !seen.insert(job.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate job name '{}'",
                job.name
            )));
        }
    }

    Ok(())
}

/// Validates a single job entry
fn validate_job(job: &JobConfig) -> Result<(), ConfigError> {
    validate_job_name(&job.name)?;

    let url = Url::parse(&job.homepage)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid homepage '{}': {}", job.homepage, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Homepage '{}' must use the http or https scheme",
            job.homepage
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Homepage '{}' has no host",
            job.homepage
        )));
    }

    if job.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "Job '{}': max_pages must be >= 1",
            job.name
        )));
    }

    if job.workers < 1 || job.workers > 64 {
        return Err(ConfigError::Validation(format!(
            "Job '{}': workers must be between 1 and 64, got {}",
            job.name, job.workers
        )));
    }

    Ok(())
}

/// Validates a job name: non-empty, safe for use as a directory component
fn validate_job_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "Job name cannot be empty".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "Job name '{}' must contain only alphanumeric characters, hyphens, and underscores",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::OutputConfig;

    fn test_job(name: &str) -> JobConfig {
        JobConfig {
            name: name.to_string(),
            homepage: "https://example.com".to_string(),
            max_pages: 100,
            workers: 4,
            delay_ms: None,
            language: None,
        }
    }

    fn test_config(jobs: Vec<JobConfig>) -> Config {
        Config {
            crawler: CrawlerConfig::default(),
            output: OutputConfig {
                root_dir: "./crawls".to_string(),
            },
            jobs,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = test_config(vec![test_job("news"), test_job("forum")]);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_no_jobs_rejected() {
        let config = test_config(vec![]);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_job_names_rejected() {
        let config = test_config(vec![test_job("news"), test_job("news")]);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let mut job = test_job("news");
        job.max_pages = 0;
        assert!(validate(&test_config(vec![job])).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut job = test_job("news");
        job.workers = 0;
        assert!(validate(&test_config(vec![job])).is_err());
    }

    #[test]
    fn test_invalid_homepage_rejected() {
        let mut job = test_job("news");
        job.homepage = "not a url".to_string();
        assert!(matches!(
            validate(&test_config(vec![job])),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut job = test_job("news");
        job.homepage = "ftp://example.com".to_string();
        assert!(validate(&test_config(vec![job])).is_err());
    }

    #[test]
    fn test_job_name_with_slash_rejected() {
        let job = test_job("bad/name");
        assert!(validate(&test_config(vec![job])).is_err());
    }
}
