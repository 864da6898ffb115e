//! DOCX document extractor.

use super::{DocumentExtractor, ExtractedDocument};
use crate::error::{IngestError, IngestResult};
use distill_core::DocumentMetadata;
use std::path::Path;
use tracing::debug;

/// Maximum title length when falling back to the first text line.
const MAX_TITLE_LEN: usize = 100;

/// Extractor for DOCX files.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> IngestResult<ExtractedDocument> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        debug!("extracting DOCX: {:?}", path);

        let bytes = std::fs::read(path)?;
        let docx = docx_rs::read_docx(&bytes).map_err(|e| IngestError::ExtractError {
            path: path.to_path_buf(),
            message: format!("failed to read DOCX archive: {}", e),
        })?;

        let paragraphs = collect_paragraphs(&docx);
        let text = paragraphs.join("\n\n");

        let source_file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.docx");

        let mut metadata = DocumentMetadata::new(source_file);
        metadata.title = title_from_text(&paragraphs);

        debug!("extracted {} characters from {}", text.len(), source_file);

        Ok(ExtractedDocument { text, metadata })
    }

    fn extensions(&self) -> &[&str] {
        &["docx"]
    }
}

/// Collect the trimmed text of every non-empty paragraph, skipping tables.
fn collect_paragraphs(docx: &docx_rs::Docx) -> Vec<String> {
    let mut paragraphs = Vec::new();

    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            let mut text = String::new();
            for child in &p.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in &run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }

            let text = text.trim();
            if !text.is_empty() {
                paragraphs.push(text.to_string());
            }
        }
    }

    paragraphs
}

/// Use the first non-empty line as a title when the document carries none.
fn title_from_text(paragraphs: &[String]) -> Option<String> {
    paragraphs
        .first()
        .map(|line| line.chars().take(MAX_TITLE_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use tempfile::NamedTempFile;

    fn write_docx(paragraphs: &[&str]) -> NamedTempFile {
        let file = NamedTempFile::with_suffix(".docx").unwrap();

        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }

        let handle = std::fs::File::create(file.path()).unwrap();
        docx.build().pack(handle).unwrap();
        file
    }

    #[test]
    fn test_extract_paragraphs_and_title() {
        let file = write_docx(&["How to resolve 503 errors", "", "Check the IP whitelist."]);

        let extractor = DocxExtractor::new();
        let doc = extractor.extract(file.path()).unwrap();

        assert!(doc.text.contains("How to resolve 503 errors"));
        assert!(doc.text.contains("Check the IP whitelist."));
        assert_eq!(
            doc.metadata.title,
            Some("How to resolve 503 errors".to_string())
        );
        assert!(doc.metadata.source_file.ends_with(".docx"));
    }

    #[test]
    fn test_empty_paragraphs_are_skipped() {
        let file = write_docx(&["first", "   ", "second"]);

        let extractor = DocxExtractor::new();
        let doc = extractor.extract(file.path()).unwrap();

        assert_eq!(doc.text, "first\n\nsecond");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let extractor = DocxExtractor::new();
        let result = extractor.extract(Path::new("/nonexistent/doc.docx"));
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }

    #[test]
    fn test_garbage_bytes_are_an_extract_error() {
        let file = NamedTempFile::with_suffix(".docx").unwrap();
        std::fs::write(file.path(), b"not a zip archive").unwrap();

        let extractor = DocxExtractor::new();
        let result = extractor.extract(file.path());
        assert!(matches!(result, Err(IngestError::ExtractError { .. })));
    }

    #[test]
    fn test_supports_extension() {
        let extractor = DocxExtractor::new();
        assert!(extractor.supports("docx"));
        assert!(extractor.supports("DOCX"));
        assert!(!extractor.supports("pdf"));
    }

    #[test]
    fn test_long_first_line_is_truncated_for_title() {
        let long = "a".repeat(150);
        let file = write_docx(&[long.as_str()]);

        let extractor = DocxExtractor::new();
        let doc = extractor.extract(file.path()).unwrap();

        assert_eq!(doc.metadata.title.unwrap().len(), MAX_TITLE_LEN);
    }
}
