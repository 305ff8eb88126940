//! Rendering whole flashcards, one at a time or as a bounded batch.
//!
//! ```text
//! compile_flashcards ──(semaphore, budget permits)──┬─ compile_flashcard ─ front, back
//!                                                   ├─ compile_flashcard ─ front, back
//!                                                   └─ ...
//! ```
//!
//! A card holds one permit while both of its sides compile one after the
//! other, so the budget bounds live compiler processes, not just cards.

use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::compiler::TypstCompiler;
use crate::error::{BatchError, CardFailure, Result};
use crate::flashcard::{Flashcard, RenderedSides};
use crate::preamble;

impl TypstCompiler {
    /// Render both sides of `card`.
    ///
    /// The card is only updated when both sides compiled; on error it keeps
    /// whatever it had before.
    pub async fn compile_flashcard<C: Flashcard + ?Sized>(&self, card: &mut C) -> Result<()> {
        let front_source = preamble::assemble(card.preamble(), &card.as_typst(true));
        let back_source = preamble::assemble(card.preamble(), &card.as_typst(false));

        let directory = card.directory();
        let front = self.compile(&front_source, directory).await?;
        let back = self.compile(&back_source, directory).await?;

        card.set_rendered(RenderedSides { front, back });
        Ok(())
    }

    /// Render every card, at most `budget` compiler processes at a time.
    ///
    /// All cards are attempted even when some fail. Successful cards are
    /// updated in place; failures come back together as a [`BatchError`],
    /// in the same order as `cards`.
    pub async fn compile_flashcards<C: Flashcard>(
        &self,
        cards: &mut [C],
    ) -> std::result::Result<(), BatchError> {
        let total = cards.len();
        let started_at = Instant::now();
        info!(
            cards = total,
            max_processes = self.budget().get(),
            "Compiling {total} flashcards..."
        );

        let limiter = Semaphore::new(self.budget().get());
        let limiter = &limiter;
        let tasks = cards.iter_mut().enumerate().map(|(index, card)| async move {
            // The limiter is local to this call and never closed.
            let Ok(_permit) = limiter.acquire().await else {
                unreachable!("compile limiter closed");
            };
            debug!(card = index, "Compiling flashcard");
            (index, self.compile_flashcard(card).await)
        });

        let failures: Vec<CardFailure> = join_all(tasks)
            .await
            .into_iter()
            .filter_map(|(index, result)| result.err().map(|error| CardFailure { index, error }))
            .collect();

        for failure in &failures {
            debug!(card = failure.index, error = %failure.error, "Flashcard failed to compile");
        }
        info!(
            cards = total,
            failed = failures.len(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Flashcard compilation finished"
        );

        match BatchError::from_failures(total, failures) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
