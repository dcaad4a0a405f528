//! Deck command handlers.

use super::AppContext;
use clap::Subcommand;
use flashcarder_core::{Browser, Card};
use std::path::{Path, PathBuf};

/// Deck subcommands.
#[derive(Subcommand)]
pub enum DeckCommands {
    /// List decks
    List {
        /// Only decks in this language category
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Create an empty deck
    Add {
        /// Deck title
        title: String,
        /// Language category code
        #[arg(short, long)]
        language: String,
    },
    /// Rename a deck
    Rename {
        /// Deck ID
        id: String,
        /// New title
        title: String,
    },
    /// Delete a deck, its cards and its study session
    Delete {
        /// Deck ID
        id: String,
    },
    /// Show a deck's cards, or browse to one card
    Show {
        /// Deck ID
        id: String,
        /// Show only the card at this position, counting from 1
        #[arg(long)]
        at: Option<usize>,
    },
}

/// Handle deck commands.
pub async fn handle_deck(
    command: DeckCommands,
    cwd: &Path,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut ctx = AppContext::open(cwd, data_dir).await?;
    let result = run(&mut ctx, command);
    ctx.finish().await;
    result
}

fn run(ctx: &mut AppContext, command: DeckCommands) -> anyhow::Result<()> {
    let app = &mut ctx.app;
    match command {
        DeckCommands::List { language } => {
            let decks: Vec<_> = match &language {
                Some(code) => app.decks().decks_for_language(code),
                None => app.decks().get_all().iter().collect(),
            };
            if decks.is_empty() {
                println!("No decks found.");
                return Ok(());
            }
            println!("{:<32} {:<24} {:<12} {:>5}", "ID", "TITLE", "LANGUAGE", "CARDS");
            println!("{}", "-".repeat(76));
            for deck in decks {
                let studying = if app.session(&deck.id).is_some() {
                    " *"
                } else {
                    ""
                };
                println!(
                    "{:<32} {:<24} {:<12} {:>5}{}",
                    deck.id,
                    truncate(&deck.title, 24),
                    deck.display_name,
                    deck.cards.len(),
                    studying
                );
            }
        }
        DeckCommands::Add { title, language } => {
            let deck = app.add_deck(&title, &language)?;
            println!("Created deck: {} ({})", deck.title, deck.id);
        }
        DeckCommands::Rename { id, title } => {
            app.rename_deck(&id, &title)?;
            println!("Renamed deck {id}");
        }
        DeckCommands::Delete { id } => {
            let deck = app.delete_deck(&id)?;
            println!("Deleted deck: {} ({} cards)", deck.title, deck.cards.len());
        }
        DeckCommands::Show { id, at } => {
            let deck = app.deck(&id)?;
            println!("{} [{}]", deck.title, deck.display_name);
            println!("State: {}", app.study_state(&id));
            println!();
            match at {
                Some(index) => {
                    let browser = Browser::at(index.saturating_sub(1));
                    match browser.current(deck) {
                        Some(card) => {
                            println!("Card {} of {}", browser.index(deck) + 1, deck.cards.len());
                            print_card(card);
                            let mut peek = browser;
                            if let Some(next) = peek.next(deck) {
                                println!("Next: {}", next.front);
                            }
                        }
                        None => println!("This deck has no cards."),
                    }
                }
                None if deck.cards.is_empty() => println!("This deck has no cards."),
                None => {
                    for (i, card) in deck.cards.iter().enumerate() {
                        println!("{:>3}. {}  {} / {}", i + 1, card.id, card.front, card.back);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Print both sides and any extras of a card.
pub fn print_card(card: &Card) {
    println!("  Front: {}", card.front);
    println!("  Back:  {}", card.back);
    if let Some(pronunciation) = &card.pronunciation {
        println!("  Pronunciation: {pronunciation}");
    }
    if let Some(example) = &card.example {
        println!("  Example: {example}");
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
