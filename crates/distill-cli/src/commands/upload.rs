//! Upload command - forward stored documents to the Dify dataset by hand.

use super::load_config;
use anyhow::Result;
use colored::Colorize;
use distill_dify::{DifyClient, UploadOutcome};
use std::path::Path;
use tokio::runtime::Runtime;

pub fn run(path: &Path) -> Result<()> {
    let config = load_config()?;

    if !config.dify.enabled {
        anyhow::bail!("Dify forwarding is disabled. Enable it in the [dify] config section.");
    }

    let client = DifyClient::from_config(&config.dify)?;
    let rt = Runtime::new()?;

    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let files: Vec<_> = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        walkdir::WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.into_path())
            .collect()
    };

    if files.is_empty() {
        println!("{}", "No files found.".yellow());
        return Ok(());
    }

    let mut uploaded = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for file in &files {
        match rt.block_on(client.upload_file(file)) {
            Ok(UploadOutcome::Uploaded) => {
                uploaded += 1;
                println!("  {} {}", "✓".green(), file.display());
            }
            Ok(UploadOutcome::Skipped) => {
                skipped += 1;
                println!(
                    "  {} {} (unsupported extension)",
                    "-".dimmed(),
                    file.display()
                );
            }
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), file.display(), e);
            }
        }
    }

    println!();
    println!("{} {} files", "Uploaded:".green().bold(), uploaded);
    if skipped > 0 {
        println!("{} {} files", "Skipped:".yellow().bold(), skipped);
    }
    if failed > 0 {
        println!("{} {} files", "Failed:".red().bold(), failed);
    }

    Ok(())
}
