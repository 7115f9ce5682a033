use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub downloader: DownloaderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            downloader: DownloaderConfig::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    // Port the original backend listened on; the polling UI expects it
    "0.0.0.0:3001".parse().unwrap()
}

/// External downloader configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloaderConfig {
    /// Binary to invoke. Overridable so tests can substitute a stub.
    #[serde(default = "default_bin")]
    pub bin: String,
    /// Directory the tool writes completed files into; created at startup.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Format selector passed via `-f` when the submission names no quality.
    #[serde(default = "default_format")]
    pub format: String,
    /// Container passed via `--merge-output-format`.
    #[serde(default = "default_merge_output_format")]
    pub merge_output_format: String,
    /// Optional `--user-agent` override.
    pub user_agent: Option<String>,
    /// Optional `--cookies` file.
    pub cookies_file: Option<PathBuf>,
    /// When false, `--no-check-certificate` is passed.
    #[serde(default)]
    pub check_certificate: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            bin: default_bin(),
            download_dir: default_download_dir(),
            format: default_format(),
            merge_output_format: default_merge_output_format(),
            user_agent: None,
            cookies_file: None,
            check_certificate: false,
        }
    }
}

fn default_bin() -> String {
    "yt-dlp".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_format() -> String {
    "bestvideo+bestaudio/best".to_string()
}

fn default_merge_output_format() -> String {
    "mp4".to_string()
}
