//! Distill Quality - The quality gate for enriched documents.
//!
//! The gate validates an enriched document string (YAML frontmatter +
//! markdown body) against heuristic quality rules and reduces the findings
//! to a weighted score in [0, 1] with an accept/reject decision.
//!
//! # Examples
//!
//! ```
//! use distill_quality::QualityGate;
//!
//! let gate = QualityGate::new(0.7);
//! let result = gate.validate("not a frontmatter document");
//! assert!(!result.is_valid);
//! assert_eq!(result.score, 0.0);
//! ```

mod validator;

pub use validator::{QualityGate, ScoreComponents, ValidationResult};
