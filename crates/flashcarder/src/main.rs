//! Flashcarder - flashcard decks and study sessions in the terminal.
//!
//! This is the main entry point for the flashcarder CLI.

mod commands;

use clap::{Parser, Subcommand};
use commands::*;
use flashcarder_core::config::Config;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "flashcarder")]
#[command(author, version, about = "Flashcard decks and two-round study sessions", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding decks, languages and sessions
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage language categories
    Language {
        #[command(subcommand)]
        command: LanguageCommands,
    },
    /// Manage decks
    Deck {
        #[command(subcommand)]
        command: DeckCommands,
    },
    /// Manage the cards in a deck
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },
    /// Study a deck
    Study {
        #[command(subcommand)]
        command: StudyCommands,
    },
    /// Translate a word or phrase
    Translate {
        /// Text to translate
        text: String,
        /// Source language code, e.g. de-DE
        #[arg(long)]
        from: String,
        /// Target language code (defaults to English)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show the loaded configuration
    Config,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;

    // A broken config is reported by the command itself
    let level = Config::load(Some(cwd.as_path()))
        .await
        .ok()
        .and_then(|(config, _)| config.log_level());
    let log_file = init_logging(cli.verbose, level);
    if let Some(path) = &log_file {
        tracing::debug!(path = %path.display(), "Logging to file");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "Starting flashcarder");

    match cli.command {
        Commands::Language { command } => handle_language(command, &cwd, cli.data_dir).await,
        Commands::Deck { command } => handle_deck(command, &cwd, cli.data_dir).await,
        Commands::Card { command } => handle_card(command, &cwd, cli.data_dir).await,
        Commands::Study { command } => handle_study(command, &cwd, cli.data_dir).await,
        Commands::Translate { text, from, to } => handle_translate(text, from, to, &cwd).await,
        Commands::Config => show_config(&cwd).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Show configuration.
async fn show_config(cwd: &std::path::Path) -> anyhow::Result<()> {
    let (config, sources) = Config::load(Some(cwd)).await?;

    println!("Configuration sources:");
    if sources.is_empty() {
        println!("  (none)");
    } else {
        for source in &sources {
            println!("  {}", source.display());
        }
    }
    println!();

    println!("Data directory: {}", config.data_dir()?.display());
    println!();

    println!("Current configuration:");
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Print version information.
fn print_version() {
    println!("flashcarder {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Flashcard decks and two-round study sessions for the terminal.");
}
