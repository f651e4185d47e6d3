//! Job orchestration module
//!
//! This module contains everything that runs a crawl job to its budget:
//!
//! - `PageCounter` / `JobPhase`: shared progress state polled for termination
//! - `RefillPolicy`: reconciles the durable frontier into the dispatch queue
//! - the worker loop: dequeue, process, signal starvation
//! - `JobMaster`: per-job orchestrator owning queue, workers, and monitoring
//! - the run driver: starts all configured jobs and cleans up after them

mod driver;
mod master;
mod progress;
mod refill;
mod worker;

pub use driver::{drive, run_jobs};
pub use master::{JobHandle, JobMaster};
pub use progress::{JobPhase, PageCounter};
pub use refill::RefillPolicy;
