//! API models for the download, status, and formats endpoints.
//!
//! The wire contract is the one the original polling frontend was built
//! against:
//! - `POST /download` takes a [`SubmitRequest`] and answers with
//!   [`SubmitResponse`] (`{ "jobId": "..." }`).
//! - `GET /status/{job_id}` answers with the full [`crate::jobs::Job`]
//!   record (camelCase fields).
//! - `GET /formats?url=...` answers with an ordered list of
//!   [`crate::runner::FormatOption`] entries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct SubmitRequest {
    /// Source URL. Only non-emptiness is validated here; anything else
    /// is left for the downloader to reject.
    #[serde(default)]
    pub url: String,
    /// Optional format/quality selector (a `format_id` from the formats
    /// endpoint).
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatsQuery {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub version: String,
}
