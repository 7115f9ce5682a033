use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::models::{Job, JobUpdate};

/// Shared in-memory map of job id to job state.
///
/// The map is the only mutable state shared between request handlers and
/// running jobs. Every mutation goes through [`JobStore::apply`] under the
/// write lock, so a runner's metadata write can never interleave with an
/// exit handler's status write on the same record. Reads are point-in-time
/// snapshots and never block on an in-flight job.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new queued job and return its id.
    ///
    /// Ids are time-sortable UUIDv7 strings, unique for the process
    /// lifetime.
    pub async fn create(&self) -> String {
        let job_id = Uuid::now_v7().to_string();
        let job = Job::new(job_id.clone());
        self.jobs.write().await.insert(job_id.clone(), job);
        debug!(job_id, "Created job");
        job_id
    }

    /// Snapshot a job by id. `None` for unknown ids.
    pub async fn get(&self, job_id: &str) -> Option<Job> {
        self.jobs.read().await.get(job_id).cloned()
    }

    /// Apply a partial update atomically. Returns `false` for unknown ids.
    pub async fn apply(&self, job_id: &str, update: JobUpdate) -> bool {
        if update.is_empty() {
            return true;
        }

        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(job_id) else {
            warn!(job_id, "Update for unknown job dropped");
            return false;
        };

        if let Some(status) = update.status {
            job.status = status;
        }
        if let Some(progress) = update.progress {
            job.progress = progress;
        }
        if let Some(title) = update.title {
            job.title = title;
        }
        if let Some(duration) = update.duration {
            job.duration = duration;
        }
        if let Some(size) = update.size {
            job.size = size;
        }
        if let Some(error_message) = update.error_message {
            job.error_message = Some(error_message);
        }
        if let Some(path) = update.output_file_path {
            job.output_file_path = Some(path);
        }
        job.updated_at = chrono::Utc::now();
        true
    }

    /// Store a stderr excerpt as a diagnostic, but only if the job has no
    /// message yet. Stderr alone does not decide the outcome; the exit
    /// code does.
    pub async fn record_diagnostic(&self, job_id: &str, excerpt: String) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(job_id) {
            if job.error_message.is_none() {
                job.error_message = Some(excerpt);
                job.updated_at = chrono::Utc::now();
            }
        }
    }

    /// Number of tracked jobs (monitoring only).
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::{JobStatus, PLACEHOLDER};

    #[tokio::test]
    async fn test_create_returns_unique_ids() {
        let store = JobStore::new();
        let a = store.create().await;
        let b = store.create().await;
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_new_job_starts_queued_with_placeholders() {
        let store = JobStore::new();
        let id = store.create().await;
        let job = store.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.progress, 0);
        assert_eq!(job.title, PLACEHOLDER);
        assert_eq!(job.duration, PLACEHOLDER);
        assert_eq!(job.size, PLACEHOLDER);
        assert!(job.error_message.is_none());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = JobStore::new();
        assert!(store.get("no-such-job").await.is_none());
    }

    #[tokio::test]
    async fn test_apply_merges_fields() {
        let store = JobStore::new();
        let id = store.create().await;

        let applied = store
            .apply(
                &id,
                JobUpdate {
                    status: Some(JobStatus::Running),
                    progress: Some(45),
                    title: Some("My Video".to_string()),
                    ..JobUpdate::default()
                },
            )
            .await;
        assert!(applied);

        let job = store.get(&id).await.unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.progress, 45);
        assert_eq!(job.title, "My Video");
        // Untouched fields keep their previous values
        assert_eq!(job.duration, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_apply_unknown_id_is_dropped() {
        let store = JobStore::new();
        let applied = store
            .apply("missing", JobUpdate::status(JobStatus::Failed))
            .await;
        assert!(!applied);
    }

    #[tokio::test]
    async fn test_progress_applied_literally() {
        let store = JobStore::new();
        let id = store.create().await;

        let mut update = JobUpdate::default();
        update.progress = Some(45);
        store.apply(&id, update).await;

        // A later, lower value still wins; no max-clamping
        let mut update = JobUpdate::default();
        update.progress = Some(30);
        store.apply(&id, update).await;

        assert_eq!(store.get(&id).await.unwrap().progress, 30);
    }

    #[tokio::test]
    async fn test_record_diagnostic_keeps_first() {
        let store = JobStore::new();
        let id = store.create().await;

        store.record_diagnostic(&id, "first stderr chunk".to_string()).await;
        store.record_diagnostic(&id, "second stderr chunk".to_string()).await;

        let job = store.get(&id).await.unwrap();
        assert_eq!(job.error_message.as_deref(), Some("first stderr chunk"));
    }

    #[tokio::test]
    async fn test_concurrent_jobs_do_not_cross_contaminate() {
        let store = JobStore::new();
        let id_a = store.create().await;
        let id_b = store.create().await;

        // Interleave writes to both jobs from two tasks
        let store_a = store.clone();
        let a = id_a.clone();
        let writer_a = tokio::spawn(async move {
            for pct in [10u8, 20, 30, 40, 50] {
                let mut update = JobUpdate::default();
                update.progress = Some(pct);
                update.title = Some("Video A".to_string());
                store_a.apply(&a, update).await;
            }
        });

        let store_b = store.clone();
        let b = id_b.clone();
        let writer_b = tokio::spawn(async move {
            for pct in [15u8, 35, 55, 75, 95] {
                let mut update = JobUpdate::default();
                update.progress = Some(pct);
                update.title = Some("Video B".to_string());
                store_b.apply(&b, update).await;
            }
        });

        writer_a.await.unwrap();
        writer_b.await.unwrap();

        let job_a = store.get(&id_a).await.unwrap();
        let job_b = store.get(&id_b).await.unwrap();
        assert_eq!(job_a.title, "Video A");
        assert_eq!(job_a.progress, 50);
        assert_eq!(job_b.title, "Video B");
        assert_eq!(job_b.progress, 95);
    }
}
