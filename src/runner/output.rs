//! Downloader output parsing
//!
//! The external tool interleaves unstructured progress lines and
//! one-object-per-line JSON metadata on stdout. This module turns a raw
//! chunk of that stream into a [`JobUpdate`]. Parsing is tolerant by
//! design: a line that fails to parse is logged at debug and skipped,
//! never fatal to the job.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::humanize::{format_duration, format_size};
use crate::jobs::JobUpdate;

static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(?:\.\d+)?%").unwrap());

static CHUNK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)chunk\s+(\d+)\s+of\s+(\d+)").unwrap());

/// Extract progress and metadata signals from one chunk of stdout.
///
/// A chunk may hold zero or more newline-delimited lines. Within a chunk,
/// later lines supersede earlier ones for every field, so the returned
/// update carries the last value seen per field. Progress values are
/// applied literally; out-of-order duplicates are not clamped against
/// prior state.
pub fn parse_chunk(chunk: &str) -> JobUpdate {
    let mut update = JobUpdate::default();

    for line in chunk.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(pct) = parse_progress(line) {
            update.progress = Some(pct);
        }

        parse_metadata_line(line, &mut update);
    }

    update
}

/// Percent pattern first; "chunk X of Y" only as a fallback when the line
/// has no percentage at all.
fn parse_progress(line: &str) -> Option<u8> {
    if let Some(caps) = PERCENT_RE.captures_iter(line).last() {
        let pct: u64 = caps[1].parse().ok()?;
        return Some(pct.min(100) as u8);
    }

    let caps = CHUNK_RE.captures(line)?;
    let current: f64 = caps[1].parse().ok()?;
    let total: f64 = caps[2].parse().ok()?;
    if total <= 0.0 {
        return None;
    }
    Some((100.0 * current / total).round().min(100.0) as u8)
}

fn parse_metadata_line(line: &str, update: &mut JobUpdate) {
    // Cheap pre-filter: only lines that look like JSON objects
    if !line.starts_with('{') {
        return;
    }

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "Skipping unparseable metadata line");
            return;
        }
    };

    if let Some(title) = value.get("title").and_then(|v| v.as_str()) {
        update.title = Some(title.to_string());
    }
    // The tool reports fractional durations for some extractors
    if let Some(duration) = value.get("duration").and_then(|v| v.as_f64()) {
        update.duration = Some(format_duration(duration.max(0.0) as u64));
    }
    if let Some(filesize) = value.get("filesize").and_then(|v| v.as_u64()) {
        update.size = Some(format_size(filesize));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_line() {
        let update = parse_chunk("[download]  45.2% of 10.00MiB at 1.2MiB/s\n");
        assert_eq!(update.progress, Some(45));
    }

    #[test]
    fn test_last_percentage_wins_within_chunk() {
        let update = parse_chunk("[download] 10%\n[download] 25%\n[download] 40%\n");
        assert_eq!(update.progress, Some(40));
    }

    #[test]
    fn test_lower_percentage_still_applies() {
        // Duplicate/out-of-order output is taken literally
        assert_eq!(parse_chunk("...45%...").progress, Some(45));
        assert_eq!(parse_chunk("...30%...").progress, Some(30));
    }

    #[test]
    fn test_chunk_fallback() {
        let update = parse_chunk("downloading chunk 3 of 8");
        assert_eq!(update.progress, Some(38));
    }

    #[test]
    fn test_chunk_fallback_rounds() {
        assert_eq!(parse_chunk("chunk 1 of 3").progress, Some(33));
        assert_eq!(parse_chunk("chunk 2 of 3").progress, Some(67));
    }

    #[test]
    fn test_percentage_beats_chunk_pattern() {
        let update = parse_chunk("chunk 1 of 10 (50%)");
        assert_eq!(update.progress, Some(50));
    }

    #[test]
    fn test_chunk_of_zero_ignored() {
        assert_eq!(parse_chunk("chunk 1 of 0").progress, None);
    }

    #[test]
    fn test_metadata_line() {
        let update =
            parse_chunk(r#"{"title":"My Video","duration":125,"filesize":10485760}"#);
        assert_eq!(update.title.as_deref(), Some("My Video"));
        assert_eq!(update.duration.as_deref(), Some("2:5"));
        assert_eq!(update.size.as_deref(), Some("10.00 MB"));
    }

    #[test]
    fn test_fractional_duration_truncated() {
        let update = parse_chunk(r#"{"title":"Live Clip","duration":125.4}"#);
        assert_eq!(update.duration.as_deref(), Some("2:5"));

        let update = parse_chunk(r#"{"duration":59.9}"#);
        assert_eq!(update.duration.as_deref(), Some("0:59"));
    }

    #[test]
    fn test_partial_metadata() {
        let update = parse_chunk(r#"{"title":"Clip"}"#);
        assert_eq!(update.title.as_deref(), Some("Clip"));
        assert!(update.duration.is_none());
        assert!(update.size.is_none());
    }

    #[test]
    fn test_last_metadata_line_wins() {
        let chunk = concat!(
            r#"{"title":"First"}"#,
            "\n",
            r#"{"title":"Second","duration":61}"#,
            "\n",
        );
        let update = parse_chunk(chunk);
        assert_eq!(update.title.as_deref(), Some("Second"));
        assert_eq!(update.duration.as_deref(), Some("1:1"));
    }

    #[test]
    fn test_malformed_json_with_title_substring() {
        // Broken JSON that merely contains "title": must not panic or
        // abort later lines in the same chunk
        let chunk = "{\"title\": broken\n{\"title\":\"Recovered\"}\n";
        let update = parse_chunk(chunk);
        assert_eq!(update.title.as_deref(), Some("Recovered"));
    }

    #[test]
    fn test_empty_and_noise_lines_ignored() {
        let update = parse_chunk("\n\n[info] Extracting URL\n  \n");
        assert!(update.is_empty());
    }

    #[test]
    fn test_metadata_and_progress_in_one_chunk() {
        let chunk = "[download] 12%\n{\"title\":\"Mixed\",\"filesize\":1048576}\n[download] 13%\n";
        let update = parse_chunk(chunk);
        assert_eq!(update.progress, Some(13));
        assert_eq!(update.title.as_deref(), Some("Mixed"));
        assert_eq!(update.size.as_deref(), Some("1.00 MB"));
    }

    #[test]
    fn test_percentage_over_100_capped_to_range() {
        let update = parse_chunk("weird 250% line");
        assert_eq!(update.progress, Some(100));
    }
}
