//! Built-in language catalogue and migration of stored language data.

use crate::model::{Deck, LanguageCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A language the translation service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupportedLanguage {
    pub name: &'static str,
    pub code: &'static str,
}

const fn lang(name: &'static str, code: &'static str) -> SupportedLanguage {
    SupportedLanguage { name, code }
}

/// All built-in languages, in display order.
pub const SUPPORTED: &[SupportedLanguage] = &[
    lang("German", "de-DE"),
    lang("Spanish", "es-ES"),
    lang("French", "fr-FR"),
    lang("Italian", "it-IT"),
    lang("Portuguese", "pt-PT"),
    lang("Russian", "ru-RU"),
    lang("Japanese", "ja-JP"),
    lang("Korean", "ko-KR"),
    lang("Chinese", "zh-CN"),
    lang("Arabic", "ar-SA"),
    lang("Hindi", "hi-IN"),
    lang("Turkish", "tr-TR"),
    lang("Dutch", "nl-NL"),
    lang("Polish", "pl-PL"),
    lang("Vietnamese", "vi-VN"),
    lang("Thai", "th-TH"),
];

/// Look up a built-in language by code.
pub fn find_by_code(code: &str) -> Option<&'static SupportedLanguage> {
    SUPPORTED.iter().find(|l| l.code == code)
}

/// Catalogue name for a code, or the code itself if unknown.
pub fn display_name_for(code: &str) -> String {
    find_by_code(code)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Languages whose name contains `query`, ignoring case.
pub fn search(query: &str) -> Vec<&'static SupportedLanguage> {
    let query = query.to_lowercase();
    SUPPORTED
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&query))
        .collect()
}

/// A language entry as found in storage.
///
/// Older versions stored a bare code string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredLanguage {
    Category(LanguageCategory),
    Code(String),
}

impl StoredLanguage {
    /// Convert to a category, reporting whether anything was filled in.
    fn into_category(self) -> (LanguageCategory, bool) {
        match self {
            StoredLanguage::Category(c) if !c.display_name.is_empty() => (c, false),
            StoredLanguage::Category(c) => {
                let display_name = display_name_for(&c.code);
                (LanguageCategory::new(c.code, display_name), true)
            }
            StoredLanguage::Code(code) => {
                let display_name = display_name_for(&code);
                (LanguageCategory::new(code, display_name), true)
            }
        }
    }
}

/// Convert stored entries to categories. Returns whether any changed.
pub fn migrate_languages(stored: Vec<StoredLanguage>) -> (Vec<LanguageCategory>, bool) {
    let mut changed = false;
    let languages = stored
        .into_iter()
        .map(|entry| {
            let (category, filled) = entry.into_category();
            changed |= filled;
            category
        })
        .collect();
    (languages, changed)
}

/// Give decks without a display name the catalogue name of their
/// language. Returns whether any deck changed.
pub fn fill_display_names(decks: &mut [Deck]) -> bool {
    let mut changed = false;
    for deck in decks.iter_mut().filter(|d| d.display_name.is_empty()) {
        deck.display_name = display_name_for(&deck.language);
        changed = true;
    }
    changed
}

/// Append a category for every deck language not yet listed, first deck
/// wins. Returns whether any category was added.
pub fn merge_deck_languages(languages: &mut Vec<LanguageCategory>, decks: &[Deck]) -> bool {
    let mut known: HashSet<String> = languages.iter().map(|l| l.code.clone()).collect();
    let before = languages.len();
    for deck in decks.iter().filter(|d| !d.language.is_empty()) {
        if known.insert(deck.language.clone()) {
            languages.push(LanguageCategory::new(
                deck.language.clone(),
                deck.display_name.clone(),
            ));
        }
    }
    languages.len() != before
}

/// Number of decks under `code`.
pub fn deck_count(decks: &[Deck], code: &str) -> usize {
    decks.iter().filter(|d| d.language == code).count()
}
