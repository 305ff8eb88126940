//! Command-line surface for `flashcard-render`.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use flashcard_typst::CompilerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "flashcard-render",
    version,
    about = "Render flashcard decks to front/back SVGs with Typst",
    long_about = None
)]
pub struct Cli {
    /// Deck files, or directories searched recursively for `.md` decks
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Typst executable
    #[arg(long = "typst", env = "TYPST_CMD", default_value = "typst")]
    pub typst_cmd: PathBuf,

    /// Directory passed to typst as `--root`
    #[arg(long, env = "TYPST_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Maximum concurrent typst processes [default: 1.5 x logical CPUs]
    #[arg(long, env = "FLASHCARD_RENDER_JOBS")]
    pub jobs: Option<usize>,

    /// Kill a typst process that runs longer than this
    #[arg(long, env = "FLASHCARD_RENDER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Where to write SVGs [default: next to each deck]
    #[arg(long, env = "FLASHCARD_RENDER_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    pub fn compiler_config(&self) -> CompilerConfig {
        let mut config = CompilerConfig::new(&self.typst_cmd, &self.root);
        if let Some(jobs) = self.jobs {
            config = config.with_max_processes(jobs);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}
