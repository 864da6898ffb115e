//! LLM-based document enrichment.
//!
//! The analyzer classifies raw text, restructures it as markdown, and
//! assembles the enriched document (YAML frontmatter + body) consumed by the
//! quality gate.

use crate::error::{IngestError, IngestResult};
use crate::prompts::{CLASSIFY_PROMPT, STRUCTURE_PROMPT};
use distill_config::LlmConfig;
use distill_core::{Classification, DocumentMetadata};
use distill_ollama::{GenerateOptions, GenerateRequest, OllamaClient};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Identifier written into the quality block of every generated document.
const GENERATED_BY: &str = "distill v0.1";

/// How much of the document the classification prompt sees.
const CLASSIFY_SAMPLE_CHARS: usize = 2000;

/// LLM analyzer for enriching extracted documents.
pub struct Analyzer {
    client: OllamaClient,
    model: String,
    temperature: f32,
    max_tokens: i32,
    rt: Runtime,
}

impl Analyzer {
    /// Create an analyzer from config, verifying the Ollama server is up.
    pub fn from_config(config: &LlmConfig) -> IngestResult<Self> {
        let client = OllamaClient::from_config(config)?;
        let rt = Runtime::new().map_err(|e| IngestError::Runtime(e.to_string()))?;

        let is_available = rt.block_on(client.is_available());
        if !is_available {
            return Err(IngestError::EnrichmentUnavailable(format!(
                "Ollama is not running at {}",
                config.host
            )));
        }

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            rt,
        })
    }

    /// Enrich extracted text into the frontmatter + markdown wire form.
    pub fn analyze(&self, text: &str, metadata: &DocumentMetadata) -> IngestResult<String> {
        debug!("classifying {}", metadata.source_file);
        let classification = self.classify(text)?;

        debug!("structuring {} as markdown", metadata.source_file);
        let markdown = self.structure_markdown(text)?;

        Ok(assemble_document(metadata, &classification, &markdown))
    }

    /// Classify the document via the LLM.
    ///
    /// An unparsable model response falls back to the default "Unknown"
    /// classification; only transport failures surface as errors.
    fn classify(&self, text: &str) -> IngestResult<Classification> {
        let sample: String = text.chars().take(CLASSIFY_SAMPLE_CHARS).collect();
        let prompt = format!("{}\n\n---\n\nDOCUMENT:\n\n{}", CLASSIFY_PROMPT, sample);

        let response = self.generate(prompt)?;
        let classification = parse_classification(&response);
        if !classification.is_identified() {
            debug!("model did not identify a document type");
        }
        Ok(classification)
    }

    /// Rewrite the raw text as structured markdown.
    fn structure_markdown(&self, text: &str) -> IngestResult<String> {
        let prompt = format!("{}\n\n---\n\nTEXT:\n\n{}", STRUCTURE_PROMPT, text);
        let response = self.generate(prompt)?;
        Ok(response.trim().to_string())
    }

    fn generate(&self, prompt: String) -> IngestResult<String> {
        let request = GenerateRequest::new(&self.model, prompt).with_options(
            GenerateOptions::new()
                .with_temperature(self.temperature)
                .with_num_predict(self.max_tokens),
        );

        let response = self.rt.block_on(self.client.generate(request))?;
        Ok(response.response)
    }
}

/// Extract the first JSON object from a model response and deserialize it.
fn parse_classification(response: &str) -> Classification {
    let start = response.find('{');
    let end = response.rfind('}');

    let parsed = match (start, end) {
        (Some(start), Some(end)) if end > start => {
            serde_json::from_str::<Classification>(&response[start..=end]).ok()
        }
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        warn!("could not parse classification from model response, using fallback");
        Classification::default()
    })
}

#[derive(Serialize)]
struct Frontmatter<'a> {
    source: SourceBlock<'a>,
    classification: ClassificationBlock<'a>,
    quality: QualityBlock,
}

#[derive(Serialize)]
struct SourceBlock<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<&'a str>,
    #[serde(rename = "ingestionDate")]
    ingestion_date: String,
}

#[derive(Serialize)]
struct ClassificationBlock<'a> {
    #[serde(rename = "type")]
    doc_type: &'a str,
    products: &'a [String],
    audience: &'a [String],
    tags: &'a [String],
}

#[derive(Serialize)]
struct QualityBlock {
    #[serde(rename = "generatedBy")]
    generated_by: &'static str,
    #[serde(rename = "needsReview")]
    needs_review: bool,
}

/// Compose the enriched document wire form.
fn assemble_document(
    metadata: &DocumentMetadata,
    classification: &Classification,
    markdown: &str,
) -> String {
    let frontmatter = Frontmatter {
        source: SourceBlock {
            file: &metadata.source_file,
            author: metadata.author.as_deref(),
            created: metadata.created.as_deref(),
            ingestion_date: metadata.extraction_date.to_rfc3339(),
        },
        classification: ClassificationBlock {
            doc_type: &classification.doc_type,
            products: &classification.products,
            audience: &classification.audience,
            tags: &classification.tags,
        },
        quality: QualityBlock {
            generated_by: GENERATED_BY,
            needs_review: true,
        },
    };

    // Struct serialization cannot fail here; fall back to an empty mapping
    // rather than panicking if it ever does.
    let yaml = serde_yaml::to_string(&frontmatter).unwrap_or_else(|_| "{}\n".to_string());

    let title = metadata
        .title
        .clone()
        .or_else(|| extract_h1_title(markdown))
        .unwrap_or_else(|| "Untitled document".to_string());

    format!(
        "---\n{yaml}---\n\n# {title}\n\n> **Summary**: {summary}\n\n---\n\n{markdown}\n",
        yaml = yaml,
        title = title,
        summary = classification.summary,
        markdown = markdown,
    )
}

/// First H1 text in a markdown string, if any.
fn extract_h1_title(markdown: &str) -> Option<String> {
    let parser = Parser::new(markdown);
    let mut in_h1 = false;
    let mut title = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading(HeadingLevel::H1, _, _)) => in_h1 = true,
            Event::End(Tag::Heading(HeadingLevel::H1, _, _)) => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_h1 = false;
            }
            Event::Text(t) if in_h1 => title.push_str(&t),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_quality::QualityGate;

    fn faq_classification() -> Classification {
        Classification {
            doc_type: "FAQ".to_string(),
            products: vec!["OSE".to_string()],
            audience: vec!["L1".to_string()],
            tags: vec!["api".to_string(), "errors".to_string()],
            summary: "How to resolve 503 errors on the OSE API".to_string(),
        }
    }

    fn structured_markdown() -> &'static str {
        "# Resolving 503 errors\n\n## Cause\n\nThe load balancer blocks requests from \
         unlisted addresses, which surfaces to clients as a 503 response.\n\n## Fix\n\n\
         1. Check the IP whitelist.\n2. Add the client address.\n3. Retry the request.\n\
         \nContact the gateway team if the error persists after whitelisting."
    }

    #[test]
    fn test_parse_classification_from_chatty_response() {
        let response = "Sure! Here is the classification:\n{\"type\": \"FAQ\", \
                        \"products\": [\"OSE\"], \"tags\": [\"api\"]}\nLet me know!";
        let classification = parse_classification(response);

        assert_eq!(classification.doc_type, "FAQ");
        assert_eq!(classification.products, vec!["OSE".to_string()]);
    }

    #[test]
    fn test_parse_classification_falls_back_on_garbage() {
        let classification = parse_classification("I cannot classify this document.");
        assert_eq!(classification, Classification::default());
    }

    #[test]
    fn test_parse_classification_falls_back_on_invalid_json() {
        let classification = parse_classification("{type: FAQ, broken");
        assert_eq!(classification, Classification::default());
    }

    #[test]
    fn test_assembled_document_has_wire_shape() {
        let metadata = DocumentMetadata::new("faq_ose.docx").with_title("FAQ OSE");
        let document = assemble_document(&metadata, &faq_classification(), structured_markdown());

        assert!(document.starts_with("---\n"));
        assert!(document.contains("file: faq_ose.docx"));
        assert!(document.contains("type: FAQ"));
        assert!(document.contains("generatedBy: distill v0.1"));
        assert!(document.contains("needsReview: true"));
        assert!(document.contains("# FAQ OSE"));
        assert!(document.contains("> **Summary**: How to resolve 503 errors"));
    }

    #[test]
    fn test_assembled_document_passes_the_quality_gate() {
        let metadata = DocumentMetadata::new("faq_ose.docx").with_title("FAQ OSE");
        let document = assemble_document(&metadata, &faq_classification(), structured_markdown());

        let gate = QualityGate::new(0.7);
        let result = gate.validate(&document);

        assert!(result.is_valid, "errors: {:?}", result.errors);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_fallback_classification_is_rejected_by_the_gate() {
        // The "Unknown" path is a normal outcome; the gate is what rejects it.
        let metadata = DocumentMetadata::new("mystery.docx").with_title("Mystery");
        let document =
            assemble_document(&metadata, &Classification::default(), structured_markdown());

        let gate = QualityGate::new(0.7);
        let result = gate.validate(&document);

        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&"document type not identified".to_string()));
    }

    #[test]
    fn test_title_falls_back_to_markdown_h1() {
        let metadata = DocumentMetadata::new("faq_ose.docx");
        let document = assemble_document(&metadata, &faq_classification(), structured_markdown());

        assert!(document.contains("# Resolving 503 errors"));
    }

    #[test]
    fn test_extract_h1_title() {
        assert_eq!(
            extract_h1_title("# Hello World\n\nbody"),
            Some("Hello World".to_string())
        );
        assert_eq!(extract_h1_title("## Only H2\n\nbody"), None);
        assert_eq!(extract_h1_title("no headings at all"), None);
    }
}
