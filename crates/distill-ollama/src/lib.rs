//! Distill Ollama - Ollama integration for document enrichment.
//!
//! This crate provides an async client for Ollama's generation API, used by
//! the enrichment stage to classify documents and restructure their text.

mod client;
mod error;
mod types;

pub use client::OllamaClient;
pub use error::{OllamaError, OllamaResult};
pub use types::*;
