//! Flashcard data model shared by the renderer crates.
//!
//! Provides:
//! - Plain-text deck parser (`ID:` / `Q:` / `A:` blocks)
//! - Shared card types

pub mod error;
pub mod parser;
pub mod types;

pub use error::{ParseError, Result};
pub use parser::parse;
pub use types::RawCard;
