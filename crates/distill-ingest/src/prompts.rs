//! Prompt templates for the enrichment stage.

/// Classification prompt. The model must answer with a single JSON object.
pub const CLASSIFY_PROMPT: &str = r#"You are a technical documentation classifier.

Analyze the document below and answer with a single JSON object, no preamble
and no markdown fences, using exactly these fields:

{
  "type": "FAQ | Runbook | Guide | Reference | ReleaseNotes | Unknown",
  "products": ["product codes mentioned in the document"],
  "audience": ["L1", "L2", "L3"],
  "tags": ["3-6 short lowercase topic tags"],
  "summary": "one sentence summarizing the document"
}

Use "Unknown" for the type and empty lists when you cannot tell."#;

/// Markdown structuring prompt.
pub const STRUCTURE_PROMPT: &str = r#"You are a technical writer.

Rewrite the text below as clean, well-structured markdown:
- one H1 title line
- H2 sections grouping related content
- keep every fact from the original, invent nothing
- use lists for enumerations and steps

Answer with the markdown only, no preamble."#;
