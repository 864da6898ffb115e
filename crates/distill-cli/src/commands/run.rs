//! Run command - process the inbox through the full pipeline.

use super::load_config;
use anyhow::Result;
use colored::Colorize;
use distill_core::PipelineStats;
use distill_ingest::{scan_inbox, FileOutcome, Pipeline};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

pub fn run(inbox_override: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let mut config = load_config()?;
    if let Some(inbox) = inbox_override {
        config.paths.inbox = inbox;
    }

    let files = scan_inbox(&config.paths.inbox)?;

    if files.is_empty() {
        println!(
            "{} No .docx files in {}",
            "Note:".yellow().bold(),
            config.paths.inbox.display()
        );
        return Ok(());
    }

    println!(
        "{} {} ({} files)",
        "Scanning:".cyan(),
        config.paths.inbox.display(),
        files.len()
    );

    if dry_run {
        for file in &files {
            println!("  {}", file.display());
        }
        println!();
        println!("{}", "Dry run - no files were processed.".cyan());
        return Ok(());
    }

    let pipeline = Pipeline::from_config(&config)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut stats = PipelineStats::default();

    for file in &files {
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file");
        pb.set_message(filename.to_string());
        stats.total += 1;

        match pipeline.process_file_report(file) {
            FileOutcome::Stored { receipt, score } => {
                stats.record_success();
                pb.println(format!(
                    "  {} {} (score {:.2}, {} copies)",
                    "✓".green(),
                    receipt.filename,
                    score,
                    receipt.paths.len()
                ));
            }
            FileOutcome::Rejected { validation } => {
                stats.record_rejection();
                pb.println(format!(
                    "  {} {} (score {:.2})",
                    "✗".yellow(),
                    filename,
                    validation.score
                ));
                for error in &validation.errors {
                    pb.println(format!("      {}", error.dimmed()));
                }
            }
            FileOutcome::Failed { message } => {
                stats.record_failure();
                pb.println(format!("  {} {}: {}", "✗".red(), filename, message));
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    println!();
    println!("{} {} files", "Processed:".cyan().bold(), stats.total);
    println!("{} {}", "Stored:".green().bold(), stats.succeeded);
    if stats.rejected > 0 {
        println!("{} {}", "Rejected:".yellow().bold(), stats.rejected);
    }
    if stats.failed > 0 {
        println!("{} {}", "Failed:".red().bold(), stats.failed);
    }

    Ok(())
}
