//! Distill Dify - Forwarding stored documents to a Dify dataset.
//!
//! Thin client for Dify's document upload endpoint. Uploads are best-effort:
//! the pipeline treats failures as warnings, never batch failures.

mod client;
mod error;

pub use client::{DifyClient, UploadOutcome};
pub use error::{DifyError, DifyResult};
