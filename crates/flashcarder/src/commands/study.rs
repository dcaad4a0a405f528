//! Study mode command handlers.
//!
//! Each invocation is one user action on a deck's session; the session
//! itself lives in storage between invocations.

use super::AppContext;
use clap::Subcommand;
use flashcarder_core::{App, StudyState, Transition};
use std::path::{Path, PathBuf};

/// Study subcommands.
#[derive(Subcommand)]
pub enum StudyCommands {
    /// Start studying a deck, or resume where you left off
    Start {
        /// Deck ID
        deck: String,
    },
    /// Show the current card and progress
    Status {
        /// Deck ID
        deck: String,
        /// Print progress as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark the current card as known
    #[command(name = "got-it")]
    GotIt {
        /// Deck ID
        deck: String,
    },
    /// Mark the current card as missed; it comes back later
    Missed {
        /// Deck ID
        deck: String,
    },
    /// Skip to the next card in the queue
    Next {
        /// Deck ID
        deck: String,
    },
    /// Go back to the previous card in the queue
    Previous {
        /// Deck ID
        deck: String,
    },
    /// Start round two with the English side first
    #[command(name = "next-round")]
    NextRound {
        /// Deck ID
        deck: String,
    },
    /// Leave study mode and forget the session
    Exit {
        /// Deck ID
        deck: String,
    },
    /// Pick up edits and deletions made to the deck since the last action
    Focus {
        /// Deck ID
        deck: String,
    },
}

impl StudyCommands {
    fn deck(&self) -> &str {
        match self {
            Self::Start { deck }
            | Self::Status { deck, .. }
            | Self::GotIt { deck }
            | Self::Missed { deck }
            | Self::Next { deck }
            | Self::Previous { deck }
            | Self::NextRound { deck }
            | Self::Exit { deck }
            | Self::Focus { deck } => deck,
        }
    }
}

/// Handle study commands.
pub async fn handle_study(
    command: StudyCommands,
    cwd: &Path,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut ctx = AppContext::open(cwd, data_dir).await?;
    let result = run(&mut ctx.app, command);
    ctx.finish().await;
    result
}

fn run(app: &mut App, command: StudyCommands) -> anyhow::Result<()> {
    // The deck may have changed since the last invocation.
    if !matches!(
        command,
        StudyCommands::Start { .. } | StudyCommands::Exit { .. } | StudyCommands::Focus { .. }
    ) {
        app.focus(command.deck());
    }

    match command {
        StudyCommands::Start { deck } => {
            app.start_study(&deck)?;
            show(app, &deck)?;
        }
        StudyCommands::Status { deck, json } => {
            if json {
                let progress = app.progress(&deck)?;
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                show(app, &deck)?;
            }
        }
        StudyCommands::GotIt { deck } => {
            let card_id = current_card_id(app, &deck)?;
            app.mark_correct(&deck, &card_id)?;
            show(app, &deck)?;
        }
        StudyCommands::Missed { deck } => {
            let card_id = current_card_id(app, &deck)?;
            app.mark_incorrect(&deck, &card_id)?;
            show(app, &deck)?;
        }
        StudyCommands::Next { deck } => {
            app.next_card(&deck)?;
            show(app, &deck)?;
        }
        StudyCommands::Previous { deck } => {
            app.previous_card(&deck)?;
            show(app, &deck)?;
        }
        StudyCommands::NextRound { deck } => {
            app.advance_round(&deck)?;
            println!("Round two: English side first.");
            show(app, &deck)?;
        }
        StudyCommands::Exit { deck } => {
            if app.exit_study(&deck) {
                println!("Left study mode.");
            } else {
                println!("Not studying this deck.");
            }
        }
        StudyCommands::Focus { deck } => {
            if app.focus(&deck) == Transition::Changed {
                println!("Session updated from the deck.");
            }
            show(app, &deck)?;
        }
    }
    Ok(())
}

fn current_card_id(app: &App, deck_id: &str) -> anyhow::Result<String> {
    app.session(deck_id)
        .and_then(|s| s.current_card())
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No card to answer; see `flashcarder study status {deck_id}`"))
}

fn show(app: &App, deck_id: &str) -> anyhow::Result<()> {
    let progress = app.progress(deck_id)?;
    let state = app.study_state(deck_id);

    match state {
        StudyState::Inactive => {
            println!("Not studying. Start with `flashcarder study start {deck_id}`.");
            return Ok(());
        }
        StudyState::RoundOneComplete => {
            println!(
                "Round one done: {} correct. Continue with `flashcarder study next-round {deck_id}`.",
                progress.correct
            );
            return Ok(());
        }
        StudyState::RoundTwoComplete => {
            println!("Both rounds done. Leave with `flashcarder study exit {deck_id}`.");
            return Ok(());
        }
        StudyState::RoundOneActive | StudyState::RoundTwoActive => {}
    }

    println!(
        "{} | {} left of {} | correct {} | incorrect {}",
        state, progress.remaining, progress.deck_size, progress.correct, progress.incorrect
    );
    let Some(session) = app.session(deck_id) else {
        return Ok(());
    };
    if let (Some((shown, hidden)), Some(card)) = (session.displayed_sides(), session.current_card())
    {
        println!();
        println!("  {shown}");
        println!("  -> {hidden}");
        if let Some(pronunciation) = &card.pronunciation {
            println!("  Pronunciation: {pronunciation}");
        }
        if let Some(example) = &card.example {
            println!("  Example: {example}");
        }
    }
    Ok(())
}
