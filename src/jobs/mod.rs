//! In-memory job tracking
//!
//! One [`Job`] per download attempt, keyed by a UUIDv7 id and held in a
//! process-local [`JobStore`]. Jobs are never evicted; bookkeeping lives
//! only for the lifetime of the process, which is an accepted limitation.

mod models;
mod store;

pub use models::{Job, JobStatus, JobUpdate, PLACEHOLDER};
pub use store::JobStore;
