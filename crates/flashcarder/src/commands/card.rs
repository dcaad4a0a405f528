//! Card command handlers.

use super::AppContext;
use clap::{Args, Subcommand};
use flashcarder_core::CardDraft;
use flashcarder_translate::{fill_missing_side, MyMemoryClient};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Card subcommands.
#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a card to a deck
    Add {
        /// Deck ID
        deck: String,
        #[command(flatten)]
        fields: CardFields,
        /// Translate the side left empty
        #[arg(short, long)]
        translate: bool,
    },
    /// Edit a card; omitted fields keep their value
    Edit {
        /// Deck ID
        deck: String,
        /// Card ID
        card: String,
        #[command(flatten)]
        fields: CardFields,
    },
    /// Delete a card
    Delete {
        /// Deck ID
        deck: String,
        /// Card ID
        card: String,
    },
}

/// Card form fields.
#[derive(Args)]
pub struct CardFields {
    /// First side (the deck's language unless --english-first)
    #[arg(short, long)]
    front: Option<String>,
    /// Second side (English unless --english-first)
    #[arg(short, long)]
    back: Option<String>,
    /// Example sentence
    #[arg(short, long)]
    example: Option<String>,
    /// Pronunciation hint
    #[arg(short, long)]
    pronunciation: Option<String>,
    /// The first side is the English one
    #[arg(long)]
    english_first: Option<bool>,
}

impl CardFields {
    fn apply(self, mut draft: CardDraft) -> CardDraft {
        if let Some(front) = self.front {
            draft.front = front;
        }
        if let Some(back) = self.back {
            draft.back = back;
        }
        if self.example.is_some() {
            draft.example = self.example;
        }
        if self.pronunciation.is_some() {
            draft.pronunciation = self.pronunciation;
        }
        if let Some(english_first) = self.english_first {
            draft.is_english_first = english_first;
        }
        draft
    }
}

/// Handle card commands.
pub async fn handle_card(
    command: CardCommands,
    cwd: &Path,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut ctx = AppContext::open(cwd, data_dir).await?;
    let result = run(&mut ctx, command).await;
    ctx.finish().await;
    result
}

async fn run(ctx: &mut AppContext, command: CardCommands) -> anyhow::Result<()> {
    match command {
        CardCommands::Add {
            deck,
            fields,
            translate,
        } => {
            let language = ctx.app.deck(&deck)?.language.clone();
            let mut draft = fields.apply(CardDraft::default());

            if translate {
                if ctx.config.translation_enabled() {
                    let client = MyMemoryClient::new(Some(ctx.config.translation_endpoint()));
                    draft = fill_missing_side(&client, draft, &language)
                        .await
                        .map_err(|e| anyhow::anyhow!("Translation failed, try again: {e}"))?;
                } else {
                    warn!("Translation requested but disabled in config");
                    eprintln!("Translation is disabled in the configuration.");
                }
            }

            let card = ctx.app.add_card(&deck, draft)?;
            println!("Added card {}: {} / {}", card.id, card.front, card.back);
        }
        CardCommands::Edit { deck, card, fields } => {
            let existing = ctx
                .app
                .deck(&deck)?
                .card(&card)
                .ok_or_else(|| anyhow::anyhow!("Card {card} not found in deck {deck}"))?;
            let draft = fields.apply(CardDraft::from_card(existing));
            let edited = ctx.app.edit_card(&deck, &card, draft)?;
            println!("Updated card {}: {} / {}", edited.id, edited.front, edited.back);
        }
        CardCommands::Delete { deck, card } => {
            let removal = ctx.app.delete_card(&deck, &card)?;
            println!("Deleted card: {}", removal.card.front);
            if removal.deck_now_empty {
                println!("The deck is now empty.");
            }
        }
    }
    Ok(())
}
