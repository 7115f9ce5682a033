use serde::{Deserialize, Serialize};

/// Value shown for metadata fields before the downloader has reported them.
pub const PLACEHOLDER: &str = "fetching";

/// Lifecycle state of a download job.
///
/// Transitions are `Queued -> Running -> {Completed | Failed}` and never
/// regress; `Completed` and `Failed` are terminal.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One tracked download attempt.
///
/// Field names serialize in camelCase to match the contract the polling
/// frontend was built against (`jobId`, `errorMessage`, `outputFilePath`).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    pub status: JobStatus,
    /// Integer percent in `[0, 100]`. Applied literally as reported by the
    /// downloader; out-of-order duplicates are not clamped to a running max.
    pub progress: u8,
    pub title: String,
    pub duration: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file_path: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Job {
    pub fn new(job_id: String) -> Self {
        let now = chrono::Utc::now();
        Self {
            job_id,
            status: JobStatus::Queued,
            progress: 0,
            title: PLACEHOLDER.to_string(),
            duration: PLACEHOLDER.to_string(),
            size: PLACEHOLDER.to_string(),
            error_message: None,
            output_file_path: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied atomically to a stored job.
///
/// Runners build one of these per observed event (output chunk, process
/// exit) so that metadata and status writes from different tasks cannot
/// interleave mid-record.
#[derive(Debug, Default, Clone)]
pub struct JobUpdate {
    pub status: Option<JobStatus>,
    pub progress: Option<u8>,
    pub title: Option<String>,
    pub duration: Option<String>,
    pub size: Option<String>,
    pub error_message: Option<String>,
    pub output_file_path: Option<String>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.progress.is_none()
            && self.title.is_none()
            && self.duration.is_none()
            && self.size.is_none()
            && self.error_message.is_none()
            && self.output_file_path.is_none()
    }
}
