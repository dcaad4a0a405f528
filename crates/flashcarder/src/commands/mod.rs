//! Command handlers for the flashcarder CLI.
//!
//! Each subcommand group lives in its own module. Every handler opens the
//! application through [`context::AppContext`], does its work and finishes
//! the context so pending writes land before the process exits.

pub mod card;
pub mod context;
pub mod deck;
pub mod language;
pub mod logging;
pub mod study;
pub mod translate;

pub use card::*;
pub use context::*;
pub use deck::*;
pub use language::*;
pub use logging::*;
pub use study::*;
pub use translate::*;
