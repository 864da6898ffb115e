//! Error types for the ingestion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur during ingestion.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] distill_config::ConfigError),

    #[error("LLM error: {0}")]
    Ollama(#[from] distill_ollama::OllamaError),

    #[error("Storage error: {0}")]
    Store(#[from] distill_store::StoreError),

    #[error("Upload error: {0}")]
    Dify(#[from] distill_dify::DifyError),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Extraction error for {path}: {message}")]
    ExtractError { path: PathBuf, message: String },

    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}
