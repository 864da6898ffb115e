//! Initialize distill.

use super::{get_paths, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use distill_config::Config;

pub fn run() -> Result<()> {
    let paths = get_paths()?;

    if paths.is_initialized() {
        println!("{} Distill is already initialized.", "Note:".yellow().bold());
        println!("  Config: {}", paths.config_file.display());
        return Ok(());
    }

    println!("{}", "Initializing distill...".cyan().bold());

    paths.ensure_dirs().context("Failed to create directories")?;
    println!("  {} Created directories", "✓".green());

    Config::create_default_file(&paths.config_file)
        .context("Failed to create config file")?;
    println!(
        "  {} Created config: {}",
        "✓".green(),
        paths.config_file.display()
    );

    let config = load_config()?;
    std::fs::create_dir_all(&config.paths.inbox).context("Failed to create inbox directory")?;
    println!(
        "  {} Created inbox: {}",
        "✓".green(),
        config.paths.inbox.display()
    );

    std::fs::create_dir_all(&config.paths.knowledge)
        .context("Failed to create knowledge directory")?;
    println!(
        "  {} Created knowledge store: {}",
        "✓".green(),
        config.paths.knowledge.display()
    );

    println!();
    println!("{}", "Distill initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Review the config: {}", "distill config show".cyan());
    println!("  2. Verify Ollama: {}", "distill check".cyan());
    println!(
        "  3. Drop .docx files into the inbox and run: {}",
        "distill run".cyan()
    );

    Ok(())
}
