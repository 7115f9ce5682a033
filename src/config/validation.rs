use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("downloader.bin must not be empty")]
    EmptyDownloaderBin,

    #[error("downloader.download_dir must not be empty")]
    EmptyDownloadDir,

    #[error("downloader.format must not be empty")]
    EmptyFormat,

    #[error("downloader.cookies_file does not exist: {0}")]
    MissingCookiesFile(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.downloader.bin.trim().is_empty() {
        return Err(ValidationError::EmptyDownloaderBin);
    }

    if config.downloader.download_dir.as_os_str().is_empty() {
        return Err(ValidationError::EmptyDownloadDir);
    }

    if config.downloader.format.trim().is_empty() {
        return Err(ValidationError::EmptyFormat);
    }

    if let Some(cookies) = &config.downloader.cookies_file {
        if !cookies.exists() {
            return Err(ValidationError::MissingCookiesFile(
                cookies.display().to_string(),
            ));
        }
    }

    Ok(())
}
