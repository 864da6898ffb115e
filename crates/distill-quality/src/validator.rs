//! Document validation and scoring logic.

use distill_config::QualityConfig;
use serde_yaml::Value;
use tracing::debug;

/// Frontmatter delimiter token.
const DELIMITER: &str = "---";

/// Component weights. Must sum to 1.0.
const SCHEMA_WEIGHT: f64 = 0.3;
const METADATA_WEIGHT: f64 = 0.4;
const CONTENT_WEIGHT: f64 = 0.3;

/// Top-level keys every frontmatter header must carry.
const REQUIRED_KEYS: [&str; 3] = ["source", "classification", "quality"];

/// Minimum body length in characters before content checks apply.
const MIN_CONTENT_CHARS: usize = 100;

/// Minimum number of non-blank, non-heading body lines.
const MIN_CONTENT_LINES: usize = 5;

/// Per-component scores before weighting, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreComponents {
    /// Presence of required top-level frontmatter keys.
    pub schema: f64,
    /// Completeness of classification and source fields.
    pub metadata: f64,
    /// Structural adequacy of the markdown body.
    pub content: f64,
}

/// Result of validating one enriched document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// True iff the weighted score meets the threshold AND no check fired.
    pub is_valid: bool,
    /// Weighted total score in [0, 1], rounded to 2 decimals.
    pub score: f64,
    /// Per-component breakdown.
    pub components: ScoreComponents,
    /// Human-readable findings, in check order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A structural rejection: score forced to zero, no component scoring.
    fn rejected(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            score: 0.0,
            components: ScoreComponents::default(),
            errors: vec![error.into()],
        }
    }
}

/// The quality gate validates enriched documents before storage.
///
/// Validation is a pure function of the input string; the only configuration
/// is the acceptance threshold. Malformed input is data, not a fault: the
/// gate never panics and never returns `Err`.
#[derive(Debug, Clone)]
pub struct QualityGate {
    min_score: f64,
}

impl QualityGate {
    /// Create a gate with the given acceptance threshold (0-1).
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// Create a gate from configuration.
    pub fn from_config(config: &QualityConfig) -> Self {
        Self::new(config.min_score)
    }

    /// Validate an enriched document (frontmatter + markdown).
    ///
    /// A document is accepted only when the weighted score reaches the
    /// threshold AND the error list is empty. Any fired check appends an
    /// error, so a single detected defect blocks acceptance regardless of
    /// the aggregate score. Strict by design.
    pub fn validate(&self, document: &str) -> ValidationResult {
        if !document.starts_with(DELIMITER) {
            return ValidationResult::rejected("missing frontmatter header");
        }

        let parts: Vec<&str> = document.split(DELIMITER).collect();
        if parts.len() < 3 {
            return ValidationResult::rejected("invalid frontmatter format");
        }

        let frontmatter_str = parts[1];
        let body = parts[2..].join(DELIMITER);
        let body = body.trim();

        let frontmatter = match serde_yaml::from_str::<Value>(frontmatter_str) {
            Ok(Value::Mapping(map)) => Value::Mapping(map),
            Ok(_) => {
                return ValidationResult::rejected("YAML error: frontmatter is not a mapping")
            }
            Err(e) => return ValidationResult::rejected(format!("YAML error: {}", e)),
        };

        let mut errors = Vec::new();

        let schema = self.score_schema(&frontmatter, &mut errors);
        let metadata = self.score_metadata(&frontmatter, &mut errors);
        let content = self.score_content(body, &mut errors);

        let total =
            schema * SCHEMA_WEIGHT + metadata * METADATA_WEIGHT + content * CONTENT_WEIGHT;
        let score = (total * 100.0).round() / 100.0;

        let is_valid = score >= self.min_score && errors.is_empty();
        debug!(
            "validated document: score={} schema={} metadata={} content={} errors={}",
            score,
            schema,
            metadata,
            content,
            errors.len()
        );

        ValidationResult {
            is_valid,
            score,
            components: ScoreComponents {
                schema,
                metadata,
                content,
            },
            errors,
        }
    }

    /// All-or-nothing check for required top-level keys.
    fn score_schema(&self, frontmatter: &Value, errors: &mut Vec<String>) -> f64 {
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| frontmatter.get(*key).is_none())
            .collect();

        if !missing.is_empty() {
            errors.push(format!("missing required keys: {}", missing.join(", ")));
            return 0.0;
        }

        1.0
    }

    /// Cumulative penalties for incomplete classification/source fields.
    fn score_metadata(&self, frontmatter: &Value, errors: &mut Vec<String>) -> f64 {
        let mut score: f64 = 1.0;

        let classification = frontmatter.get("classification");

        let doc_type = classification
            .and_then(|c| c.get("type"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if doc_type.is_empty() || doc_type == "Unknown" {
            errors.push("document type not identified".to_string());
            score -= 0.3;
        }

        if sequence_is_empty(classification.and_then(|c| c.get("products"))) {
            errors.push("no product identified".to_string());
            score -= 0.2;
        }

        if sequence_is_empty(classification.and_then(|c| c.get("tags"))) {
            errors.push("no tag identified".to_string());
            score -= 0.2;
        }

        let source_file = frontmatter
            .get("source")
            .and_then(|s| s.get("file"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if source_file.is_empty() {
            errors.push("missing source file".to_string());
            score -= 0.3;
        }

        score.max(0.0)
    }

    /// Structural checks on the markdown body.
    fn score_content(&self, content: &str, errors: &mut Vec<String>) -> f64 {
        // Too-short bodies are not worth inspecting further.
        if content.chars().count() < MIN_CONTENT_CHARS {
            errors.push("content too short (< 100 characters)".to_string());
            return 0.0;
        }

        let mut score: f64 = 1.0;

        if !has_heading(content, "# ") {
            errors.push("missing H1 title".to_string());
            score -= 0.2;
        }

        if !has_heading(content, "## ") {
            errors.push("missing H2 structure".to_string());
            score -= 0.3;
        }

        let content_lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .count();
        if content_lines < MIN_CONTENT_LINES {
            errors.push("insufficient content (< 5 lines)".to_string());
            score -= 0.4;
        }

        score.max(0.0)
    }
}

/// Whether the body contains a heading at the given marker level, either at
/// the very start or after a newline.
fn has_heading(content: &str, marker: &str) -> bool {
    content.starts_with(marker) || content.contains(&format!("\n{}", marker))
}

/// True when a frontmatter value is absent, null, or an empty sequence.
fn sequence_is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Sequence(seq)) => seq.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A document that passes every check with full marks.
    fn perfect_document() -> String {
        complete_document("FAQ", &["OSE"], &["api"], "test.docx")
    }

    /// Build a well-formed document with the given classification fields.
    fn complete_document(
        doc_type: &str,
        products: &[&str],
        tags: &[&str],
        source_file: &str,
    ) -> String {
        format!(
            r#"---
source:
  file: "{source_file}"
  author: "Test"
classification:
  type: "{doc_type}"
  products: [{products}]
  tags: [{tags}]
quality:
  generatedBy: "test"
---

# Test Document

## Section One

The first section explains how the service behaves under normal load.
It lists the relevant endpoints and their expected response times.
Latency targets are given for each endpoint alongside the figures.

## Section Two

The second section covers the error codes returned by the gateway.
Each code is paired with the remediation steps operators should take.
Escalation contacts are listed for codes that cannot be self-served.
"#,
            source_file = source_file,
            doc_type = doc_type,
            products = quote_list(products),
            tags = quote_list(tags),
        )
    }

    fn quote_list(items: &[&str]) -> String {
        items
            .iter()
            .map(|i| format!("\"{}\"", i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[test]
    fn test_missing_frontmatter_rejects_with_single_error() {
        let gate = QualityGate::new(0.7);
        let result = gate.validate("# Just markdown\n\nNo header at all.");

        assert!(!result.is_valid);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.errors, vec!["missing frontmatter header"]);
        assert_eq!(result.components, ScoreComponents::default());
    }

    #[test]
    fn test_unclosed_frontmatter_rejects() {
        let gate = QualityGate::new(0.7);
        let result = gate.validate("---\nsource:\n  file: x\n");

        assert!(!result.is_valid);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.errors, vec!["invalid frontmatter format"]);
    }

    #[test]
    fn test_unparsable_yaml_rejects() {
        let gate = QualityGate::new(0.7);
        let doc = "---\nsource: [unclosed\n---\n\nbody";
        let result = gate.validate(doc);

        assert!(!result.is_valid);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("YAML error:"));
    }

    #[test]
    fn test_scalar_frontmatter_rejects() {
        let gate = QualityGate::new(0.7);
        let result = gate.validate("---\njust a string\n---\n\nbody");

        assert!(!result.is_valid);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_perfect_document_scores_one() {
        let gate = QualityGate::new(0.7);
        let result = gate.validate(&perfect_document());

        assert_eq!(result.components.schema, 1.0);
        assert_eq!(result.components.metadata, 1.0);
        assert_eq!(result.components.content, 1.0);
        assert_eq!(result.score, 1.0);
        assert!(result.errors.is_empty());
        assert!(result.is_valid);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let gate = QualityGate::new(0.7);
        let doc = complete_document("Unknown", &[], &["api"], "test.docx");

        let first = gate.validate(&doc);
        let second = gate.validate(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_schema_keys_reported_in_one_error() {
        let gate = QualityGate::new(0.7);
        let doc = "---\nsource:\n  file: \"x.docx\"\n---\n\nbody text";
        let result = gate.validate(doc);

        assert_eq!(result.components.schema, 0.0);
        assert!(result
            .errors
            .contains(&"missing required keys: classification, quality".to_string()));
        // Exactly one schema error, not one per key
        let schema_errors = result
            .errors
            .iter()
            .filter(|e| e.starts_with("missing required keys"))
            .count();
        assert_eq!(schema_errors, 1);
    }

    #[test]
    fn test_unknown_type_penalty() {
        let gate = QualityGate::new(0.7);
        let baseline = gate.validate(&perfect_document());
        let result = gate.validate(&complete_document("Unknown", &["OSE"], &["api"], "test.docx"));

        let delta = baseline.components.metadata - result.components.metadata;
        assert!((delta - 0.3).abs() < 1e-9);
        assert_eq!(result.errors, vec!["document type not identified"]);
    }

    #[test]
    fn test_empty_products_penalty() {
        let gate = QualityGate::new(0.7);
        let baseline = gate.validate(&perfect_document());
        let result = gate.validate(&complete_document("FAQ", &[], &["api"], "test.docx"));

        let delta = baseline.components.metadata - result.components.metadata;
        assert!((delta - 0.2).abs() < 1e-9);
        assert_eq!(result.errors, vec!["no product identified"]);
    }

    #[test]
    fn test_empty_tags_penalty() {
        let gate = QualityGate::new(0.7);
        let baseline = gate.validate(&perfect_document());
        let result = gate.validate(&complete_document("FAQ", &["OSE"], &[], "test.docx"));

        let delta = baseline.components.metadata - result.components.metadata;
        assert!((delta - 0.2).abs() < 1e-9);
        assert_eq!(result.errors, vec!["no tag identified"]);
    }

    #[test]
    fn test_missing_source_file_penalty() {
        let gate = QualityGate::new(0.7);
        let baseline = gate.validate(&perfect_document());
        let result = gate.validate(&complete_document("FAQ", &["OSE"], &["api"], ""));

        let delta = baseline.components.metadata - result.components.metadata;
        assert!((delta - 0.3).abs() < 1e-9);
        assert_eq!(result.errors, vec!["missing source file"]);
    }

    #[test]
    fn test_metadata_penalties_accumulate_and_floor_at_zero() {
        let gate = QualityGate::new(0.7);
        let result = gate.validate(&complete_document("Unknown", &[], &[], ""));

        // 1.0 - 0.3 - 0.2 - 0.2 - 0.3 = 0.0
        assert_eq!(result.components.metadata, 0.0);
        assert_eq!(result.errors.len(), 4);
    }

    #[test]
    fn test_short_content_short_circuits() {
        let gate = QualityGate::new(0.7);
        // Headings present, but body under 100 characters
        let doc = "---\nsource:\n  file: \"x.docx\"\nclassification:\n  type: \"FAQ\"\n  products: [\"OSE\"]\n  tags: [\"api\"]\nquality: {}\n---\n\n# T\n\n## S\n\nshort";
        let result = gate.validate(doc);

        assert_eq!(result.components.content, 0.0);
        assert_eq!(result.errors, vec!["content too short (< 100 characters)"]);
    }

    #[test]
    fn test_missing_h2_and_thin_body_penalties() {
        let gate = QualityGate::new(0.7);
        let body = "# Title\n\nA single paragraph of prose that is long enough to clear the one \
                    hundred character floor but has no section structure at all.";
        let doc = format!(
            "---\nsource:\n  file: \"x.docx\"\nclassification:\n  type: \"FAQ\"\n  products: [\"OSE\"]\n  tags: [\"api\"]\nquality: {{}}\n---\n\n{}",
            body
        );
        let result = gate.validate(&doc);

        // -0.3 for missing H2, -0.4 for fewer than 5 content lines
        assert!((result.components.content - 0.3).abs() < 1e-9);
        assert!(result.errors.contains(&"missing H2 structure".to_string()));
        assert!(result
            .errors
            .contains(&"insufficient content (< 5 lines)".to_string()));
    }

    #[test]
    fn test_heading_at_body_start_is_detected() {
        // The body is trimmed, so the H1 sits at position zero rather than
        // after a newline. It must still count.
        let gate = QualityGate::new(0.7);
        let result = gate.validate(&perfect_document());
        assert!(!result.errors.contains(&"missing H1 title".to_string()));
    }

    #[test]
    fn test_any_error_blocks_acceptance_even_above_threshold() {
        let gate = QualityGate::new(0.7);
        // Only penalty: empty tags. Score = 0.3 + 0.4*0.8 + 0.3 = 0.92.
        let result = gate.validate(&complete_document("FAQ", &["OSE"], &[], "test.docx"));

        assert_eq!(result.score, 0.92);
        assert!(result.score >= 0.7);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_end_to_end_unknown_scenario() {
        let gate = QualityGate::new(0.7);
        let doc = "---\nsource:\n  file: \"x.docx\"\nclassification:\n  type: \"Unknown\"\n  products: []\n  tags: []\nquality: {}\n---\n\n# T\n\ncontent";
        let result = gate.validate(doc);

        assert_eq!(result.components.schema, 1.0);
        // 1.0 - 0.3 (type) - 0.2 (products) - 0.2 (tags) = 0.3
        assert!((result.components.metadata - 0.3).abs() < 1e-9);
        assert_eq!(result.components.content, 0.0);
        // 0.3*1.0 + 0.4*0.3 + 0.3*0.0 = 0.42
        assert_eq!(result.score, 0.42);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_lower_threshold_still_rejects_on_errors() {
        // The strict conjunction applies at any threshold.
        let gate = QualityGate::new(0.1);
        let result = gate.validate(&complete_document("FAQ", &["OSE"], &[], "test.docx"));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_from_config() {
        let config = QualityConfig { min_score: 0.9 };
        let gate = QualityGate::from_config(&config);
        let result = gate.validate(&perfect_document());
        assert!(result.is_valid);
    }
}
