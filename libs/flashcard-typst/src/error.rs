//! Error types for flashcard-typst.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using CompileError.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Failure of a single compiler invocation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler reported an `error: ` diagnostic.
    #[error("Typst compilation failed:\n{diagnostics}")]
    Fatal { diagnostics: String },

    #[error("failed to write temporary input {}: {source}", .path.display())]
    TempFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect compiler output: {0}")]
    Wait(#[source] io::Error),

    #[error("compiler did not finish within {after:?}")]
    Timeout { after: Duration },
}

impl CompileError {
    /// Diagnostic text of a fatal compile, if this is one.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::Fatal { diagnostics } => Some(diagnostics),
            _ => None,
        }
    }
}

/// One flashcard that could not be rendered.
#[derive(Debug)]
pub struct CardFailure {
    /// Position of the card in the submitted batch.
    pub index: usize,
    pub error: CompileError,
}

/// A batch where at least one flashcard failed.
///
/// Holds every failure in submission order. Cards that compiled are already
/// updated when this is returned.
#[derive(Debug)]
pub struct BatchError {
    attempted: usize,
    first: CardFailure,
    rest: Vec<CardFailure>,
}

impl BatchError {
    /// Build from collected failures; `None` when nothing failed.
    pub fn from_failures(attempted: usize, failures: Vec<CardFailure>) -> Option<Self> {
        let mut failures = failures.into_iter();
        let first = failures.next()?;
        Some(Self {
            attempted,
            first,
            rest: failures.collect(),
        })
    }

    /// The first failure in submission order.
    pub fn first(&self) -> &CardFailure {
        &self.first
    }

    /// Discard everything but the first failure's error.
    pub fn into_first(self) -> CompileError {
        self.first.error
    }

    pub fn failures(&self) -> impl Iterator<Item = &CardFailure> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    pub fn into_failures(self) -> Vec<CardFailure> {
        let mut all = Vec::with_capacity(1 + self.rest.len());
        all.push(self.first);
        all.extend(self.rest);
        all
    }

    pub fn failed(&self) -> usize {
        1 + self.rest.len()
    }

    /// Number of cards in the batch, failed or not.
    pub fn attempted(&self) -> usize {
        self.attempted
    }
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} flashcards failed to compile; first failure (card {}): {}",
            self.failed(),
            self.attempted,
            self.first.index,
            self.first.error
        )
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.first.error)
    }
}
