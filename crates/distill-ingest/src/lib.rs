//! Distill Ingest - Extraction, enrichment, and pipeline orchestration.
//!
//! This crate provides:
//! - DOCX text and metadata extraction
//! - LLM-based enrichment (classification + markdown structuring)
//! - The `Pipeline` orchestrator chaining extract -> enrich -> validate -> store

mod analyzer;
mod error;
mod extractors;
mod pipeline;
mod prompts;

pub use analyzer::Analyzer;
pub use error::{IngestError, IngestResult};
pub use extractors::{DocumentExtractor, DocxExtractor, ExtractedDocument};
pub use pipeline::{scan_inbox, FileOutcome, Pipeline};
