use anyhow::Result;
use clap::Parser;
use flashcard_render::args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so it can supply argument defaults.
    dotenvy::dotenv().ok();
    flashcard_render::init_tracing();

    flashcard_render::run(Cli::parse()).await
}
