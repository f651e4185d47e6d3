//! End-of-run cleanup collaborator
//!
//! Invoked by the run driver exactly once per job after completion or
//! interruption. Cleanup is best-effort: errors are logged by the caller and
//! never propagate.

use std::io;
use std::path::PathBuf;

/// Cleanup collaborator contract
pub trait Cleanup: Send + Sync {
    /// Cleans up one job's artifacts
    fn cleanup(&self, job_name: &str) -> io::Result<()>;
}

/// Removes stored pages smaller than a minimum size
///
/// Tiny page files are almost always error pages, redirects-to-nothing, or
/// truncated fetches; dropping them keeps the per-job output directory
/// meaningful.
pub struct SmallFileCleaner {
    root: PathBuf,
    min_bytes: u64,
}

impl SmallFileCleaner {
    pub fn new(root: impl Into<PathBuf>, min_bytes: u64) -> Self {
        Self {
            root: root.into(),
            min_bytes,
        }
    }

    fn pages_dir(&self, job_name: &str) -> PathBuf {
        self.root.join(job_name).join("pages")
    }
}

impl Cleanup for SmallFileCleaner {
    fn cleanup(&self, job_name: &str) -> io::Result<()> {
        let dir = self.pages_dir(job_name);
        if !dir.is_dir() {
            return Ok(());
        }

        let mut removed = 0;
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;

            if metadata.is_file() && metadata.len() < self.min_bytes {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        tracing::info!(
            "[{}] cleanup removed {} undersized files from {}",
            job_name,
            removed,
            dir.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_removes_only_undersized_files() {
        let dir = tempdir().unwrap();
        let pages = dir.path().join("news/pages");
        std::fs::create_dir_all(&pages).unwrap();

        std::fs::write(pages.join("small.html"), "x").unwrap();
        std::fs::write(pages.join("big.html"), "x".repeat(100)).unwrap();

        let cleaner = SmallFileCleaner::new(dir.path(), 50);
        cleaner.cleanup("news").unwrap();

        assert!(!pages.join("small.html").exists());
        assert!(pages.join("big.html").exists());
    }

    #[test]
    fn test_missing_pages_dir_is_ok() {
        let dir = tempdir().unwrap();
        let cleaner = SmallFileCleaner::new(dir.path(), 50);

        assert!(cleaner.cleanup("never-ran").is_ok());
    }
}
