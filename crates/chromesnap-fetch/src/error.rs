use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    // Argument errors
    #[error("Unknown archive token: {token}")]
    UnknownArchiveToken { token: String },

    #[error("No platform family matches archive token: {token}")]
    UnknownPlatformFamily { token: String },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Max retries exceeded for {url}")]
    MaxRetries { url: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Extraction errors
    #[error("Extraction failed for {zip}: {reason}")]
    ExtractionFailed { zip: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, FetchError>;
