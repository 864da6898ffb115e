//! Distill CLI - Document ingestion pipeline with an LLM enrichment stage.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Distill - DOCX to knowledge-store ingestion pipeline
#[derive(Parser)]
#[command(name = "distill")]
#[command(version)]
#[command(about = "Extract, enrich, validate, and store documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize distill (create config, inbox, and knowledge directories)
    Init,

    /// Run the pipeline over the inbox
    Run {
        /// Inbox directory (default: from config)
        #[arg(short, long)]
        inbox: Option<PathBuf>,

        /// List the files that would be processed without processing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the quality gate on an enriched markdown file
    Validate {
        /// Path to the markdown file
        file: PathBuf,

        /// Acceptance threshold override (default: from config)
        #[arg(short, long)]
        min_score: Option<f64>,
    },

    /// Check that Ollama is reachable and the configured model is available
    Check,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Upload a file or directory to the configured Dify dataset
    Upload {
        /// Path to a file or directory
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file path
    Path,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("distill=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("distill=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Run { inbox, dry_run } => commands::run::run(inbox, dry_run),
        Commands::Validate { file, min_score } => commands::validate::run(&file, min_score),
        Commands::Check => commands::check::run(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(),
            ConfigCommands::Path => commands::config::path(),
        },
        Commands::Upload { path } => commands::upload::run(&path),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
