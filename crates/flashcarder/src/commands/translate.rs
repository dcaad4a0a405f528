//! One-off translation lookups.

use flashcarder_core::config::Config;
use flashcarder_translate::{MyMemoryClient, TranslateRequest, TranslationClient, ENGLISH};
use std::path::Path;

/// Translate `text` and print the result.
pub async fn handle_translate(
    text: String,
    from: String,
    to: Option<String>,
    cwd: &Path,
) -> anyhow::Result<()> {
    let (config, _) = Config::load(Some(cwd)).await?;
    if !config.translation_enabled() {
        anyhow::bail!("Translation is disabled in the configuration");
    }

    let client = MyMemoryClient::new(Some(config.translation_endpoint()));
    let request = TranslateRequest::new(text, from, to.unwrap_or_else(|| ENGLISH.to_string()));
    let translated = client
        .translate(&request)
        .await
        .map_err(|e| anyhow::anyhow!("Translation failed, try again: {e}"))?;
    println!("{translated}");
    Ok(())
}
