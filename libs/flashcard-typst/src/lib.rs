//! Concurrent Typst compilation of flashcards.
//!
//! Every card is rendered twice (front and back) by the external `typst`
//! binary. Batches run many cards at once while keeping the number of live
//! compiler processes under a [`ConcurrencyBudget`].
//!
//! ```no_run
//! # async fn demo<C: flashcard_typst::Flashcard>(cards: &mut [C]) -> Result<(), flashcard_typst::BatchError> {
//! use flashcard_typst::{CompilerConfig, TypstCompiler};
//!
//! let compiler = TypstCompiler::new(CompilerConfig::new("typst", "."));
//! compiler.compile_flashcards(cards).await
//! # }
//! ```

pub mod batch;
pub mod budget;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod flashcard;
pub mod preamble;

pub use budget::ConcurrencyBudget;
pub use compiler::TypstCompiler;
pub use config::CompilerConfig;
pub use diagnostics::Diagnostics;
pub use error::{BatchError, CardFailure, CompileError, Result};
pub use flashcard::{Flashcard, RenderedSides};
pub use preamble::DEFAULT_PREAMBLE;
