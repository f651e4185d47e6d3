use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Durable set of known URLs for one crawl job, backed by a file
///
/// The backing file is newline-delimited URL strings with no header and no
/// ordering guarantee; duplicate lines collapse to a set on load. The store
/// is cheap to clone (it only holds the path), so the job orchestrator and
/// the fetch collaborator can each hold a handle to the same file.
///
/// Writes are last-writer-wins at file granularity. The refill policy writes
/// from a single logical actor per job, but the fetch collaborator may merge
/// discoveries into the same file concurrently; no transactional merge is
/// attempted.
#[derive(Debug, Clone)]
pub struct FrontierStore {
    path: PathBuf,
}

impl FrontierStore {
    /// Creates a store for the given backing file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current URL set from the backing file
    ///
    /// A missing file is an empty frontier, not an error. Blank lines are
    /// skipped and duplicates collapse.
    ///
    /// # Returns
    ///
    /// * `Ok(HashSet<String>)` - The deduplicated URL set
    /// * `Err(io::Error)` - The file exists but could not be read; callers
    ///   treat this as an empty frontier for the current cycle rather than
    ///   aborting
    pub fn load(&self) -> io::Result<HashSet<String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Loads the frontier, degrading an unreadable file to an empty set
    ///
    /// This is the caller-facing form of the "treat IO failure as frontier
    /// unchanged this cycle" policy: the failure is logged and the caller
    /// proceeds with what it has.
    pub fn load_or_empty(&self) -> HashSet<String> {
        match self.load() {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(
                    "Failed to read frontier file {}: {} (treating as empty)",
                    self.path.display(),
                    e
                );
                HashSet::new()
            }
        }
    }

    /// Overwrites the backing file with the given URL set
    ///
    /// The set is written to a sibling temp file and renamed into place, so a
    /// concurrent reader never observes a partially written frontier.
    pub fn save(&self, urls: &HashSet<String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut content = String::new();
        for url in urls {
            content.push_str(url);
            content.push('\n');
        }

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Merges the given URLs into the stored set, preserving existing members
    ///
    /// This is the discovery write-back path used by the fetch collaborator.
    ///
    /// # Returns
    ///
    /// The number of URLs that were not already present.
    pub fn merge(&self, urls: impl IntoIterator<Item = String>) -> io::Result<usize> {
        let mut set = self.load()?;
        let before = set.len();
        set.extend(urls);
        let added = set.len() - before;

        if added > 0 {
            self.save(&set)?;
        }

        Ok(added)
    }
}
