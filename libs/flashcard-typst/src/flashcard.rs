//! What the compiler needs from a flashcard.

use std::path::Path;

/// Rendered output of both sides of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSides {
    pub front: Vec<u8>,
    pub back: Vec<u8>,
}

/// A card that can be rendered by [`TypstCompiler`](crate::TypstCompiler).
pub trait Flashcard {
    /// Typst markup for one side; `front` selects which.
    fn as_typst(&self, front: bool) -> String;

    /// Custom preamble; `None` falls back to [`DEFAULT_PREAMBLE`](crate::DEFAULT_PREAMBLE).
    fn preamble(&self) -> Option<&str> {
        None
    }

    /// Existing, writable directory that holds the temporary inputs.
    ///
    /// Relative imports in the markup resolve against it.
    fn directory(&self) -> &Path;

    /// Store both rendered sides. Only called once both compiled.
    fn set_rendered(&mut self, rendered: RenderedSides);

    fn rendered(&self) -> Option<&RenderedSides>;
}
