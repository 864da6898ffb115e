//! Core domain types for distill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel type value the LLM falls back to when classification fails.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Classification of a document, produced by the LLM analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Document type (e.g. "FAQ", "Runbook"). `"Unknown"` when unclassified.
    #[serde(rename = "type", default = "default_doc_type")]
    pub doc_type: String,

    /// Products the document covers.
    #[serde(default)]
    pub products: Vec<String>,

    /// Intended audience levels (e.g. "L1", "L2").
    #[serde(default)]
    pub audience: Vec<String>,

    /// Topic tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// One-line summary of the document.
    #[serde(default)]
    pub summary: String,
}

fn default_doc_type() -> String {
    UNKNOWN_TYPE.to_string()
}

impl Default for Classification {
    /// Fallback classification used when the LLM response cannot be parsed.
    /// An "Unknown" classification is a normal pipeline outcome, not an error.
    fn default() -> Self {
        Self {
            doc_type: UNKNOWN_TYPE.to_string(),
            products: vec![],
            audience: vec!["L1".to_string()],
            tags: vec![],
            summary: "Document requires manual classification".to_string(),
        }
    }
}

impl Classification {
    /// Whether the document type was actually identified.
    pub fn is_identified(&self) -> bool {
        !self.doc_type.is_empty() && self.doc_type != UNKNOWN_TYPE
    }
}

/// Metadata captured from a source document during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Name of the source file (not the full path).
    pub source_file: String,
    pub author: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub title: Option<String>,
    /// When the extraction ran.
    pub extraction_date: DateTime<Utc>,
}

impl DocumentMetadata {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            author: None,
            created: None,
            modified: None,
            title: None,
            extraction_date: Utc::now(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Counters accumulated over one pipeline batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Files found in the inbox.
    pub total: usize,
    /// Files that passed the quality gate and were stored.
    pub succeeded: usize,
    /// Files rejected by the quality gate.
    pub rejected: usize,
    /// Files that failed in extraction, enrichment, or storage.
    pub failed: usize,
}

impl PipelineStats {
    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}
