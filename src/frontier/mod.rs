//! Frontier module: durable URL set plus the bounded dispatch queue
//!
//! A job's frontier lives in two places:
//!
//! - `FrontierStore`: the durable set of every URL known for the job, backed
//!   by a newline-delimited file
//! - `UrlQueue`: a bounded in-memory queue of URLs staged for immediate
//!   dispatch to workers
//!
//! Workers only ever touch the queue; the refill policy reconciles the store
//! into the queue.

mod queue;
mod store;

pub use queue::UrlQueue;
pub use store::FrontierStore;
