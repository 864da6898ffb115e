//! Source document extractors.

mod docx;

pub use docx::DocxExtractor;

use crate::error::IngestResult;
use distill_core::DocumentMetadata;
use std::path::Path;

/// Raw text and metadata pulled from a source document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Plain text content, paragraphs separated by blank lines.
    pub text: String,
    /// Metadata captured during extraction.
    pub metadata: DocumentMetadata,
}

/// Trait for source document extractors.
pub trait DocumentExtractor: Send + Sync {
    /// Extract text and metadata from a file at the given path.
    fn extract(&self, path: &Path) -> IngestResult<ExtractedDocument>;

    /// Get the supported file extensions.
    fn extensions(&self) -> &[&str];

    /// Check if this extractor supports the given extension.
    fn supports(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
