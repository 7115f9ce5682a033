use super::error::ApiError;
use super::models::SubmitRequest;

/// Validate a submission before a job is created.
///
/// Deliberately minimal: only the presence of a URL is checked. A
/// malformed or unreachable URL is not rejected up front; the downloader's
/// own failure surfaces later as job failure.
pub fn validate_submission(request: &SubmitRequest) -> Result<(), ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::MissingUrl);
    }
    Ok(())
}

/// Normalize the optional quality selector; blank strings count as unset.
pub fn normalize_quality(quality: Option<String>) -> Option<String> {
    quality
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
}
