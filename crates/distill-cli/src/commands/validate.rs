//! Validate command - run the quality gate on an enriched markdown file.

use super::load_config;
use anyhow::{Context, Result};
use colored::Colorize;
use distill_quality::QualityGate;
use std::path::Path;

pub fn run(file: &Path, min_score_override: Option<f64>) -> Result<()> {
    let config = load_config()?;
    let min_score = min_score_override.unwrap_or(config.quality.min_score);

    if !(0.0..=1.0).contains(&min_score) {
        anyhow::bail!("min score must be in [0, 1], got {}", min_score);
    }

    let document = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let gate = QualityGate::new(min_score);
    let result = gate.validate(&document);

    println!("{} {}", "Validating:".cyan().bold(), file.display());
    println!();
    println!("  Schema:   {:.2}", result.components.schema);
    println!("  Metadata: {:.2}", result.components.metadata);
    println!("  Content:  {:.2}", result.components.content);
    println!();
    println!(
        "  Score: {:.2} (threshold {:.2})",
        result.score, min_score
    );

    if !result.errors.is_empty() {
        println!();
        println!("{}", "Findings".white().bold());
        for error in &result.errors {
            println!("  {} {}", "•".dimmed(), error);
        }
    }

    println!();
    if result.is_valid {
        println!("{}", "Accepted".green().bold());
    } else {
        println!("{}", "Rejected".red().bold());
    }

    Ok(())
}
