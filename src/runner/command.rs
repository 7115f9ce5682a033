//! Downloader command construction

use std::process::Stdio;

use tokio::process::Command;

use crate::config::DownloaderConfig;

/// Build the argument vector for one download invocation.
///
/// The output template embeds the job id (`{id}_%(title)s.%(ext)s`) so
/// concurrent jobs cannot collide on a shared title; the tool itself
/// resolves the final name. `--newline` keeps progress line-buffered and
/// `--dump-json --no-simulate` makes the tool print one metadata JSON
/// object on stdout while still downloading.
pub fn download_args(
    config: &DownloaderConfig,
    job_id: &str,
    url: &str,
    quality: Option<&str>,
) -> Vec<String> {
    let mut args = common_args(config);

    args.push("-f".to_string());
    args.push(quality.unwrap_or(&config.format).to_string());
    args.push("--merge-output-format".to_string());
    args.push(config.merge_output_format.clone());
    args.push("--newline".to_string());
    args.push("--dump-json".to_string());
    args.push("--no-simulate".to_string());
    args.push("-o".to_string());
    args.push(format!(
        "{}/{}_%(title)s.%(ext)s",
        config.download_dir.display(),
        job_id
    ));
    args.push(url.to_string());

    args
}

/// Build the argument vector for a metadata-only probe (`-J` dumps the
/// full info JSON, including the `formats` list, without downloading).
pub fn probe_args(config: &DownloaderConfig, url: &str) -> Vec<String> {
    let mut args = common_args(config);
    args.push("-J".to_string());
    args.push(url.to_string());
    args
}

fn common_args(config: &DownloaderConfig) -> Vec<String> {
    let mut args = Vec::new();

    if !config.check_certificate {
        args.push("--no-check-certificate".to_string());
    }
    if let Some(user_agent) = &config.user_agent {
        args.push("--user-agent".to_string());
        args.push(user_agent.clone());
    }
    if let Some(cookies) = &config.cookies_file {
        args.push("--cookies".to_string());
        args.push(cookies.display().to_string());
    }

    args
}

/// Assemble a ready-to-spawn command with piped output streams.
pub fn download_command(
    config: &DownloaderConfig,
    job_id: &str,
    url: &str,
    quality: Option<&str>,
) -> Command {
    let mut command = Command::new(&config.bin);
    command
        .args(download_args(config, job_id, url, quality))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    command
}
