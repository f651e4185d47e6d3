use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Monotonic count of successfully processed pages for one job
///
/// Incremented exclusively by the fetch collaborator; everything else (the
/// worker loops, the monitor, the run driver) only reads it. Both the workers
/// and the monitor poll this counter against the budget, which is the sole
/// termination signal for a job.
#[derive(Debug, Default)]
pub struct PageCounter(AtomicU64);

impl PageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one processed page, returning the new count
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the current count
    pub fn read(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Lifecycle phase of a crawl job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// Initial frontier load and worker spawn in progress
    Starting,
    /// Workers dispatching, monitor loop active
    Running,
    /// Budget observed reached; outstanding work being abandoned
    Draining,
    /// Monitoring stopped, job complete
    Done,
}

/// Atomic cell holding a job's current phase
///
/// Shared between the orchestrator (writer) and the driver/tests (readers).
#[derive(Debug)]
pub struct PhaseCell(AtomicU8);

impl PhaseCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(JobPhase::Starting as u8))
    }

    pub fn set(&self, phase: JobPhase) {
        self.0.store(phase as u8, Ordering::Release);
    }

    pub fn get(&self) -> JobPhase {
        match self.0.load(Ordering::Acquire) {
            0 => JobPhase::Starting,
            1 => JobPhase::Running,
            2 => JobPhase::Draining,
            _ => JobPhase::Done,
        }
    }
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let counter = PageCounter::new();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn test_counter_increments_monotonically() {
        let counter = PageCounter::new();

        let mut last = 0;
        for _ in 0..10 {
            let next = counter.increment();
            assert!(next > last);
            last = next;
        }
        assert_eq!(counter.read(), 10);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        use std::sync::Arc;

        let counter = Arc::new(PageCounter::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let counter = counter.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    counter.increment();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.read(), 8000);
    }

    #[test]
    fn test_phase_cell_transitions() {
        let cell = PhaseCell::new();
        assert_eq!(cell.get(), JobPhase::Starting);

        cell.set(JobPhase::Running);
        assert_eq!(cell.get(), JobPhase::Running);

        cell.set(JobPhase::Draining);
        assert_eq!(cell.get(), JobPhase::Draining);

        cell.set(JobPhase::Done);
        assert_eq!(cell.get(), JobPhase::Done);
    }
}
