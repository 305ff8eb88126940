//! Deck discovery and conversion of parsed cards into renderable flashcards.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use flashcard_core::{parser, RawCard};
use flashcard_typst::{Flashcard, RenderedSides};

/// Deck-local preamble that replaces the default for every card beside it.
pub const PREAMBLE_FILE: &str = "preamble.typ";

/// A parsed card together with where it came from.
#[derive(Debug, Clone)]
pub struct DeckCard {
    pub card: RawCard,
    /// Deck file the card was parsed from.
    pub deck: PathBuf,
    /// Deck directory relative to the searched path; mirrored under `--out-dir`.
    pub subdir: PathBuf,
    directory: PathBuf,
    preamble: Option<Arc<str>>,
    rendered: Option<RenderedSides>,
}

impl DeckCard {
    pub fn new(card: RawCard, deck: impl Into<PathBuf>, preamble: Option<Arc<str>>) -> Self {
        let deck = deck.into();
        let directory = deck_directory(&deck);
        Self {
            card,
            deck,
            subdir: PathBuf::new(),
            directory,
            preamble,
            rendered: None,
        }
    }

    pub fn key(&self) -> String {
        self.card.key()
    }
}

impl Flashcard for DeckCard {
    /// `#flashcard(id, question, answer)`; the front leaves the answer empty.
    fn as_typst(&self, front: bool) -> String {
        let answer = if front { "" } else { self.card.answer.as_str() };
        format!(
            "#flashcard({}, [{}], [{}])",
            typst_string(&self.key()),
            self.card.question,
            answer
        )
    }

    fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    fn directory(&self) -> &Path {
        &self.directory
    }

    fn set_rendered(&mut self, rendered: RenderedSides) {
        self.rendered = Some(rendered);
    }

    fn rendered(&self) -> Option<&RenderedSides> {
        self.rendered.as_ref()
    }
}

/// A deck file found by [`discover`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeckPath {
    pub path: PathBuf,
    /// Directory of the deck relative to the directory it was found under.
    /// Empty for decks named directly.
    pub subdir: PathBuf,
}

impl DeckPath {
    fn new(path: PathBuf, subdir: PathBuf) -> Self {
        Self { path, subdir }
    }
}

/// Expand `paths` into deck files: files are kept as given, directories are
/// searched recursively for `.md` files. Symlinked directories are not
/// followed. The result is sorted by path and deduplicated.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<DeckPath>> {
    let mut decks = Vec::new();
    for path in paths {
        let metadata =
            fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
        if metadata.is_dir() {
            collect_decks(path, Path::new(""), &mut decks)?;
        } else {
            decks.push(DeckPath::new(path.clone(), PathBuf::new()));
        }
    }
    decks.sort();
    decks.dedup_by(|a, b| a.path == b.path);
    Ok(decks)
}

fn collect_decks(dir: &Path, subdir: &Path, decks: &mut Vec<DeckPath>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("cannot list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot list {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("cannot read {}", entry.path().display()))?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_decks(&path, &subdir.join(entry.file_name()), decks)?;
        } else if path.extension().map_or(false, |ext| ext == "md") {
            decks.push(DeckPath::new(path, subdir.to_path_buf()));
        }
    }
    Ok(())
}

/// Parse one deck file. Picks up a `preamble.typ` next to it when present.
pub fn load_deck(deck: &DeckPath) -> Result<Vec<DeckCard>> {
    let path = deck.path.as_path();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read deck {}", path.display()))?;
    let cards = parser::parse(&content)
        .with_context(|| format!("failed to parse deck {}", path.display()))?;
    let preamble = read_preamble(&deck_directory(path))?;

    Ok(cards
        .into_iter()
        .map(|card| {
            let mut card = DeckCard::new(card, path, preamble.clone());
            card.subdir = deck.subdir.clone();
            card
        })
        .collect())
}

fn read_preamble(directory: &Path) -> Result<Option<Arc<str>>> {
    let path = directory.join(PREAMBLE_FILE);
    match fs::read_to_string(&path) {
        Ok(preamble) => Ok(Some(preamble.into())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read preamble {}", path.display()))
        }
    }
}

/// Directory holding `deck`; `.` for bare file names.
fn deck_directory(deck: &Path) -> PathBuf {
    match deck.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Quote `value` as a Typst string literal.
fn typst_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
