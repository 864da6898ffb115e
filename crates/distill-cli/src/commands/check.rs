//! Check command - verify the Ollama server and configured model.

use super::load_config;
use anyhow::Result;
use colored::Colorize;
use distill_ollama::OllamaClient;
use tokio::runtime::Runtime;

pub fn run() -> Result<()> {
    let config = load_config()?;
    let client = OllamaClient::from_config(&config.llm)?;
    let rt = Runtime::new()?;

    println!("{}", "Checking Ollama...".cyan().bold());

    if !rt.block_on(client.is_available()) {
        println!(
            "  {} Server not reachable at {}",
            "✗".red(),
            config.llm.host
        );
        anyhow::bail!("Ollama is not running. Start it with 'ollama serve'.");
    }
    println!("  {} Server running at {}", "✓".green(), config.llm.host);

    if rt.block_on(client.has_model(&config.llm.model))? {
        println!("  {} Model available: {}", "✓".green(), config.llm.model);
    } else {
        println!("  {} Model not found: {}", "✗".red(), config.llm.model);
        println!();
        println!(
            "Pull it with: {}",
            format!("ollama pull {}", config.llm.model).cyan()
        );
        anyhow::bail!("Configured model is not available");
    }

    println!();
    println!("{}", "Ready to process documents.".green().bold());

    Ok(())
}
