use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tokio_util::io::ReaderStream;
use tracing::info;

use super::{
    models::{FormatsQuery, HealthResponse, SubmitRequest, SubmitResponse},
    state::AppState,
    validation::{normalize_quality, validate_submission},
};
use crate::api::error::ApiError;
use crate::runner;

/// Download submission endpoint (POST /download)
///
/// Creates a job, launches the external downloader for it, and returns
/// the job id immediately without waiting for completion. The caller
/// polls `/status/{job_id}` for progress.
///
/// ## Flow:
/// 1. Validate the request (url must be non-empty; nothing else)
/// 2. Create a queued job in the store (UUIDv7 id)
/// 3. Fire-and-forget a runner task that owns the external process
/// 4. Return 202 Accepted with the job id
///
/// There is no admission control: every accepted submission spawns its
/// own process immediately.
pub async fn submit_download(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_submission(&request)?;

    let url = request.url.trim().to_string();
    let quality = normalize_quality(request.quality);

    let job_id = state.store.create().await;
    state.metrics.job_submitted();
    info!(job_id, url, ?quality, "Accepted download submission");

    runner::spawn_download(
        state.store.clone(),
        state.metrics.clone(),
        state.config.downloader.clone(),
        job_id.clone(),
        url,
        quality,
    );

    Ok((StatusCode::ACCEPTED, Json(SubmitResponse { job_id })))
}

/// Job status endpoint (GET /status/{job_id})
///
/// Returns the current job record: status, progress, metadata, and error
/// information. Reads are point-in-time snapshots and never block on a
/// running job.
pub async fn get_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let job = state
        .store
        .get(&job_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("job {job_id}")))?;

    Ok((StatusCode::OK, Json(job)))
}

/// Completed file endpoint (GET /download/{filename})
///
/// Serves a finished file from the download directory as an attachment.
/// The filename must be a bare name; anything that could escape the
/// directory is treated as not found.
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(ApiError::NotFound(format!("file {filename}")));
    }

    let path = state.config.downloader.download_dir.join(&filename);
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|_| ApiError::NotFound(format!("file {filename}")))?;
    if !metadata.is_file() {
        return Err(ApiError::NotFound(format!("file {filename}")));
    }

    // Completed videos can be very large; stream instead of buffering
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|_| ApiError::NotFound(format!("file {filename}")))?;
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((StatusCode::OK, headers, body))
}

/// Format listing endpoint (GET /formats?url=...)
///
/// Asks the downloader for the selectable formats of a URL without
/// downloading anything. Failures here surface synchronously since no
/// job exists for a probe.
pub async fn list_formats(
    State(state): State<AppState>,
    Query(query): Query<FormatsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if query.url.trim().is_empty() {
        return Err(ApiError::MissingUrl);
    }

    let formats = runner::list_formats(&state.config.downloader, query.url.trim()).await?;
    Ok((StatusCode::OK, Json(formats)))
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    use std::collections::HashMap;

    let mut components = HashMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert("job_store".to_string(), "healthy".to_string());

    // The downloader binary is only exercised when a job runs; report
    // whether the download directory is reachable.
    let downloads_ok = state.config.downloader.download_dir.is_dir();
    components.insert(
        "download_dir".to_string(),
        if downloads_ok { "healthy" } else { "unhealthy" }.to_string(),
    );

    let all_healthy = components.values().all(|status| status == "healthy");
    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "unhealthy" }.to_string(),
        components,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response))
}
