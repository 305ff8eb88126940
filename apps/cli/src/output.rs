//! Writing rendered cards to disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flashcard_typst::Flashcard;

use crate::deck::DeckCard;

/// `<dir>/<deck-stem>-<key>-front.svg` and `-back.svg`.
///
/// `dir` is the deck's own directory, or its mirror under `out_dir` when given.
pub fn svg_paths(card: &DeckCard, out_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let dir = match out_dir {
        Some(out_dir) => out_dir.join(&card.subdir),
        None => card.directory().to_path_buf(),
    };
    let stem = card
        .deck
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    let key = card.key();
    (
        dir.join(format!("{stem}-{key}-front.svg")),
        dir.join(format!("{stem}-{key}-back.svg")),
    )
}

/// Fail when two cards would be written to the same files.
pub fn ensure_distinct_outputs(cards: &[DeckCard], out_dir: Option<&Path>) -> Result<()> {
    let mut owners: HashMap<PathBuf, &DeckCard> = HashMap::with_capacity(cards.len());
    for card in cards {
        let (front, _) = svg_paths(card, out_dir);
        if let Some(other) = owners.insert(front.clone(), card) {
            bail!(
                "card {} of {} and card {} of {} would both be written to {}",
                other.key(),
                other.deck.display(),
                card.key(),
                card.deck.display(),
                front.display()
            );
        }
    }
    Ok(())
}

/// Write every rendered card and return how many were written.
///
/// Cards that were not rendered are skipped.
pub fn write_rendered(cards: &[DeckCard], out_dir: Option<&Path>) -> Result<usize> {
    let mut written = 0;
    for card in cards {
        let Some(rendered) = card.rendered() else {
            continue;
        };
        let (front, back) = svg_paths(card, out_dir);
        if let Some(dir) = out_dir.and(front.parent()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        }
        fs::write(&front, &rendered.front)
            .with_context(|| format!("failed to write {}", front.display()))?;
        fs::write(&back, &rendered.back)
            .with_context(|| format!("failed to write {}", back.display()))?;
        written += 1;
    }
    Ok(written)
}
