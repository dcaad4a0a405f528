//! Testing utilities, fixtures, and mocks for flashcarder.
//!
//! - **Builders**: fluent construction of cards and decks
//! - **Fixtures**: pre-seeded storage and temporary data directories
//! - **Mocks**: storage backends that fail or count writes
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use flashcarder_test_utils::{builders::DeckBuilder, fixtures::SeededStorage};
//!
//! #[tokio::test]
//! async fn test_study() {
//!     let deck = DeckBuilder::new("d1").cards(["A", "B", "C"]).build();
//!     let storage = SeededStorage::new().with_decks(vec![deck]).build().await;
//!     let app = App::open(storage).await;
//! }
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

pub use builders::{CardBuilder, DeckBuilder};
pub use fixtures::{SeededStorage, TempDataDir};
pub use mocks::{CountingStorage, ReadOnlyStorage};
