//! Job runner
//!
//! Spawns one external downloader process per job and drives the job to a
//! terminal state: stdout is streamed line by line through the output
//! parser into the [`JobStore`], the first stderr excerpt is kept as a
//! diagnostic, and the exit code alone decides `completed` vs `failed`.
//! Every process failure is contained here and reflected only via job
//! state; nothing propagates up to crash the service.

mod command;
mod formats;
pub mod output;

pub use formats::FormatOption;

use std::process::Stdio;
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::DownloaderConfig;
use crate::jobs::{JobStatus, JobStore, JobUpdate};
use crate::observability::Metrics;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to launch downloader '{bin}': {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("downloader probe failed: {0}")]
    ProbeFailed(String),

    #[error("probe output was not valid JSON: {0}")]
    ProbeParse(#[from] serde_json::Error),
}

/// Launch the download for an already-created job and return immediately.
///
/// The submitting request does not wait for completion; the spawned task
/// owns the process for its whole lifetime. There is no cap on how many
/// jobs run at once and no cancellation once launched.
pub fn spawn_download(
    store: JobStore,
    metrics: Arc<Metrics>,
    config: DownloaderConfig,
    job_id: String,
    url: String,
    quality: Option<String>,
) {
    tokio::spawn(async move {
        run_job(store, metrics, config, job_id, url, quality).await;
    });
}

async fn run_job(
    store: JobStore,
    metrics: Arc<Metrics>,
    config: DownloaderConfig,
    job_id: String,
    url: String,
    quality: Option<String>,
) {
    info!(job_id, url, "Starting download");

    let mut child = match command::download_command(&config, &job_id, &url, quality.as_deref())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            error!(job_id, error = %err, "Downloader failed to launch");
            store
                .apply(
                    &job_id,
                    JobUpdate {
                        status: Some(JobStatus::Failed),
                        error_message: Some(format!(
                            "failed to launch downloader '{}': {}",
                            config.bin, err
                        )),
                        ..JobUpdate::default()
                    },
                )
                .await;
            metrics.job_failed();
            return;
        }
    };

    store.apply(&job_id, JobUpdate::status(JobStatus::Running)).await;

    // Stderr is drained on its own task so a chatty tool cannot block on
    // a full pipe. Only the first non-empty line is kept as a diagnostic.
    let stderr_task = child.stderr.take().map(|stderr| {
        let store = store.clone();
        let job_id = job_id.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            let mut excerpt: Option<String> = None;
            while let Ok(Some(line)) = lines.next_line().await {
                if excerpt.is_none() && !line.trim().is_empty() {
                    let line = line.trim().to_string();
                    debug!(job_id, excerpt = %line, "Captured stderr diagnostic");
                    store.record_diagnostic(&job_id, line.clone()).await;
                    excerpt = Some(line);
                }
            }
            excerpt
        })
    });

    if let Some(stdout) = child.stdout.take() {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let update = output::parse_chunk(&line);
            if !update.is_empty() {
                store.apply(&job_id, update).await;
            }
        }
    }

    let stderr_excerpt = match stderr_task {
        Some(task) => task.await.ok().flatten(),
        None => None,
    };

    match child.wait().await {
        Ok(status) if status.success() => {
            let output_file_path = find_output_file(&config, &job_id).await;
            info!(job_id, file = ?output_file_path, "Download completed");
            store
                .apply(
                    &job_id,
                    JobUpdate {
                        status: Some(JobStatus::Completed),
                        progress: Some(100),
                        output_file_path,
                        ..JobUpdate::default()
                    },
                )
                .await;
            metrics.job_completed();
        }
        Ok(status) => {
            let message = match (status.code(), stderr_excerpt) {
                (Some(code), Some(excerpt)) => {
                    format!("downloader exited with code {code}: {excerpt}")
                }
                (Some(code), None) => format!("downloader exited with code {code}"),
                (None, _) => "downloader terminated by signal".to_string(),
            };
            error!(job_id, message, "Download failed");
            store
                .apply(
                    &job_id,
                    JobUpdate {
                        status: Some(JobStatus::Failed),
                        error_message: Some(message),
                        ..JobUpdate::default()
                    },
                )
                .await;
            metrics.job_failed();
        }
        Err(err) => {
            error!(job_id, error = %err, "Failed waiting for downloader");
            store
                .apply(
                    &job_id,
                    JobUpdate {
                        status: Some(JobStatus::Failed),
                        error_message: Some(format!("failed waiting for downloader: {err}")),
                        ..JobUpdate::default()
                    },
                )
                .await;
            metrics.job_failed();
        }
    }
}

/// Locate the finished file by its `{job_id}_` prefix in the download
/// directory. The tool resolves the title and extension itself, so the
/// name is only known after the fact.
async fn find_output_file(config: &DownloaderConfig, job_id: &str) -> Option<String> {
    let prefix = format!("{job_id}_");
    let mut entries = tokio::fs::read_dir(&config.download_dir).await.ok()?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(&prefix) {
            return Some(name);
        }
    }
    None
}

/// Query the selectable formats for a URL without downloading anything.
pub async fn list_formats(
    config: &DownloaderConfig,
    url: &str,
) -> Result<Vec<FormatOption>, RunnerError> {
    let output = Command::new(&config.bin)
        .args(command::probe_args(config, url))
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| RunnerError::Spawn {
            bin: config.bin.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let excerpt = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        return Err(RunnerError::ProbeFailed(format!(
            "exit code {:?}: {}",
            output.status.code(),
            excerpt.trim()
        )));
    }

    let info: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    Ok(formats::parse_format_list(&info))
}
