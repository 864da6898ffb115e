//! Error types for Dify uploads.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Dify operations.
pub type DifyResult<T> = Result<T, DifyError>;

/// Errors that can occur when forwarding files to Dify.
#[derive(Error, Debug)]
pub enum DifyError {
    /// Uploads require api_url, api_key, and dataset_id to be set.
    #[error("Dify is not configured: {0}")]
    NotConfigured(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
