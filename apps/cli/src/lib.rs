//! `flashcard-render`: render flashcard decks to SVG with Typst.

pub mod args;
pub mod deck;
pub mod output;

use anyhow::Result;
use flashcard_typst::TypstCompiler;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::Cli;

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run(cli: Cli) -> Result<()> {
    let decks = deck::discover(&cli.paths)?;
    let mut cards = Vec::new();
    for deck in &decks {
        cards.extend(deck::load_deck(deck)?);
    }
    info!(decks = decks.len(), cards = cards.len(), "Loaded decks");

    if cards.is_empty() {
        warn!("No flashcards found; nothing to render");
        return Ok(());
    }
    output::ensure_distinct_outputs(&cards, cli.out_dir.as_deref())?;

    let compiler = TypstCompiler::new(cli.compiler_config());
    let result = compiler.compile_flashcards(&mut cards).await;
    if let Err(err) = &result {
        for failure in err.failures() {
            let card = &cards[failure.index];
            error!(
                deck = %card.deck.display(),
                card = %card.key(),
                "{}",
                failure.error
            );
        }
    }

    // Rendered cards are kept even when others failed.
    let written = output::write_rendered(&cards, cli.out_dir.as_deref())?;
    info!(cards = written, "Wrote rendered flashcards");

    result.map_err(Into::into)
}
