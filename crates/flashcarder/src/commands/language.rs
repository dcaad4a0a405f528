//! Language category command handlers.

use super::AppContext;
use clap::Subcommand;
use flashcarder_core::language;
use std::path::Path;

/// Language subcommands.
#[derive(Subcommand)]
pub enum LanguageCommands {
    /// List language categories with their deck counts
    List,
    /// Add a language category
    Add {
        /// Language code, e.g. de-DE
        code: String,
        /// Name shown for the category (defaults to the language name)
        name: Option<String>,
    },
    /// Change a category's code or name; its decks follow
    Edit {
        /// Current language code
        code: String,
        /// New language code
        #[arg(long)]
        new_code: Option<String>,
        /// New display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a category and every deck in it
    Delete {
        /// Language code
        code: String,
    },
    /// Search the built-in languages by name
    Search {
        /// Part of a language name
        #[arg(default_value = "")]
        query: String,
    },
}

/// Handle language commands.
pub async fn handle_language(
    command: LanguageCommands,
    cwd: &Path,
    data_dir: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    if let LanguageCommands::Search { query } = &command {
        let matches = language::search(query);
        if matches.is_empty() {
            println!("No languages match \"{query}\".");
        }
        for lang in matches {
            println!("{:<8} {}", lang.code, lang.name);
        }
        return Ok(());
    }

    let mut ctx = AppContext::open(cwd, data_dir).await?;
    let result = run(&mut ctx, command);
    ctx.finish().await;
    result
}

fn run(ctx: &mut AppContext, command: LanguageCommands) -> anyhow::Result<()> {
    let app = &mut ctx.app;
    match command {
        LanguageCommands::List => {
            let counts = app.decks().deck_counts();
            if counts.is_empty() {
                println!("No languages yet. Add one with `flashcarder language add <code>`.");
            } else {
                println!("{:<8} {:<24} {:>5}", "CODE", "NAME", "DECKS");
                println!("{}", "-".repeat(39));
                for (lang, count) in counts {
                    println!("{:<8} {:<24} {:>5}", lang.code, lang.display_name, count);
                }
            }
        }
        LanguageCommands::Add { code, name } => {
            let name = name.unwrap_or_else(|| language::display_name_for(&code));
            let added = app.add_language(&code, &name)?;
            println!("Added language: {} ({})", added.display_name, added.code);
        }
        LanguageCommands::Edit {
            code,
            new_code,
            name,
        } => {
            let current = app
                .decks()
                .language(&code)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Language not found: {code}"))?;
            let new_code = new_code.unwrap_or(current.code);
            let name = name.unwrap_or(current.display_name);
            let edited = app.edit_language(&code, &new_code, &name)?;
            println!("Updated language: {} ({})", edited.display_name, edited.code);
        }
        LanguageCommands::Delete { code } => {
            let removed = app.delete_language(&code)?;
            println!("Deleted language {code} and {} deck(s)", removed.len());
        }
        LanguageCommands::Search { .. } => {}
    }
    Ok(())
}
