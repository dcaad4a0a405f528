//! ULID-based identifier generation with prefixes.
//!
//! Identifiers in flashcarder follow the pattern: `prefix_ulid`
//! For example: `dck_01hqxyz...` for decks.
//!
//! Identifiers loaded from older data files are plain millisecond
//! timestamps; nothing here requires an id to be parseable, so both
//! forms coexist.

use ulid::Ulid;

/// Known identifier prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Deck,
    Card,
}

impl IdPrefix {
    /// Get the string prefix for this identifier type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Deck => "dck",
            IdPrefix::Card => "crd",
        }
    }

    /// Parse a prefix from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dck" => Some(IdPrefix::Deck),
            "crd" => Some(IdPrefix::Card),
            _ => None,
        }
    }
}

/// Identifier generation and parsing utilities.
pub struct Identifier;

impl Identifier {
    /// Generate a new ascending identifier (newer = larger).
    pub fn ascending(prefix: IdPrefix) -> String {
        Self::with_ulid(prefix, Ulid::new())
    }

    /// Generate an identifier with a specific ULID (for testing or imports).
    pub fn with_ulid(prefix: IdPrefix, ulid: Ulid) -> String {
        format!("{}_{}", prefix.as_str(), ulid.to_string().to_lowercase())
    }

    /// Parse an identifier into its prefix and ULID parts.
    pub fn parse(id: &str) -> Option<(IdPrefix, Ulid)> {
        let (prefix, rest) = id.split_once('_')?;
        let prefix = IdPrefix::parse(prefix)?;
        let ulid = Ulid::from_string(rest).ok()?;
        Some((prefix, ulid))
    }

    /// Check if an identifier has the expected prefix.
    pub fn has_prefix(id: &str, prefix: IdPrefix) -> bool {
        id.starts_with(prefix.as_str()) && id.chars().nth(prefix.as_str().len()) == Some('_')
    }

    /// Generate a deck ID.
    pub fn deck() -> String {
        Self::ascending(IdPrefix::Deck)
    }

    /// Generate a card ID.
    pub fn card() -> String {
        Self::ascending(IdPrefix::Card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascending_id() {
        let id = Identifier::ascending(IdPrefix::Deck);
        assert!(id.starts_with("dck_"));
        assert_eq!(id.len(), 30); // "dck_" (4) + ULID (26)
    }

    #[test]
    fn test_ascending_order() {
        let id1 = Identifier::card();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = Identifier::card();
        assert!(id1 < id2, "Ascending IDs should increase over time");
    }

    #[test]
    fn test_parse_id() {
        let id = Identifier::card();
        let (prefix, _ulid) = Identifier::parse(&id).unwrap();
        assert_eq!(prefix, IdPrefix::Card);
    }

    #[test]
    fn test_parse_legacy_timestamp_id() {
        assert!(Identifier::parse("1712345678901").is_none());
    }

    #[test]
    fn test_parse_invalid_ulid() {
        assert!(Identifier::parse("dck_notaulid").is_none());
    }

    #[test]
    fn test_has_prefix() {
        let id = Identifier::deck();
        assert!(Identifier::has_prefix(&id, IdPrefix::Deck));
        assert!(!Identifier::has_prefix(&id, IdPrefix::Card));
        assert!(!Identifier::has_prefix("dck123", IdPrefix::Deck));
    }

    #[test]
    fn test_with_ulid() {
        let ulid = Ulid::new();
        let id = Identifier::with_ulid(IdPrefix::Card, ulid);
        let (_, parsed_ulid) = Identifier::parse(&id).unwrap();
        assert_eq!(parsed_ulid, ulid);
    }
}
