//! Shared fixtures for the compiler integration tests.
//!
//! `FakeTypst` installs a shell script that behaves like `typst compile`:
//! it echoes the last line of its input as an SVG, and reacts to markers in
//! the source:
//! - `FAIL` writes an `error:` diagnostic
//! - `WARN` writes a warning
//! - `SLEEP=<secs>` delays the process
//! - `HANG` sleeps long enough to trip a timeout
//!
//! Everything it observes is logged under the `--root` directory.

#![allow(dead_code)]

use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flashcard_typst::{CompilerConfig, Flashcard, RenderedSides, TypstCompiler};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

const FAKE_TYPST: &str = r#"#!/bin/sh
input="$2"
root="$5"
echo "$*" >> "$root/args.log"
echo "$input" >> "$root/inputs.log"
mkdir -p "$root/running" "$root/sources"
cp "$input" "$root/sources/"
touch "$root/running/$$"
ls "$root/running" | wc -l >> "$root/peaks.log"
delay=$(sed -n 's/.*SLEEP=\([0-9.]*\).*/\1/p' "$input" | head -n 1)
if [ -n "$delay" ]; then sleep "$delay"; fi
if grep -q HANG "$input"; then sleep 30; fi
ls "$root/running" | wc -l >> "$root/peaks.log"
rm -f "$root/running/$$"
if grep -q FAIL "$input"; then
  printf 'error: unknown variable: oops\n  ┌─ %s:9:1\n' "$input" >&2
  exit 1
fi
if grep -q WARN "$input"; then
  echo 'warning: unknown font family: papyrus' >&2
fi
printf '<svg data-input="%s">%s</svg>' "$input" "$(tail -n 1 "$input")"
"#;

pub struct FakeTypst {
    dir: TempDir,
    script: PathBuf,
}

impl FakeTypst {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let script = dir.path().join("fake-typst");
        fs::write(&script, FAKE_TYPST).expect("write script");
        let mut perms = fs::metadata(&script).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).expect("set perms");
        fs::create_dir(dir.path().join("cards")).expect("cards dir");
        Self { dir, script }
    }

    /// Directory passed as `--root`; the script logs here.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Working directory for cards and their temporary inputs.
    pub fn cards_dir(&self) -> PathBuf {
        self.dir.path().join("cards")
    }

    pub fn config(&self) -> CompilerConfig {
        CompilerConfig::new(&self.script, self.root())
    }

    pub fn compiler(&self, max_processes: usize) -> TypstCompiler {
        TypstCompiler::new(self.config().with_max_processes(max_processes))
    }

    pub fn compiler_with_timeout(&self, timeout: Duration) -> TypstCompiler {
        TypstCompiler::new(self.config().with_max_processes(4).with_timeout(timeout))
    }

    pub fn args(&self) -> Vec<String> {
        self.log_lines("args.log")
    }

    /// Temporary input paths, one per invocation.
    pub fn inputs(&self) -> Vec<PathBuf> {
        self.log_lines("inputs.log").into_iter().map(PathBuf::from).collect()
    }

    /// Sources the script was handed, in no particular order.
    pub fn sources(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.root().join("sources")) else {
            return Vec::new();
        };
        entries
            .map(|entry| fs::read_to_string(entry.expect("entry").path()).expect("source"))
            .collect()
    }

    /// Highest number of script instances seen alive at once.
    pub fn peak_processes(&self) -> usize {
        self.log_lines("peaks.log")
            .iter()
            .map(|line| line.trim().parse::<usize>().expect("count"))
            .max()
            .unwrap_or(0)
    }

    /// Files left in the cards directory.
    pub fn leftover_files(&self) -> Vec<PathBuf> {
        fs::read_dir(self.cards_dir())
            .expect("cards dir")
            .map(|entry| entry.expect("entry").path())
            .collect()
    }

    fn log_lines(&self, name: &str) -> Vec<String> {
        fs::read_to_string(self.root().join(name))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Minimal in-memory card.
#[derive(Debug, Clone)]
pub struct TestCard {
    pub front: String,
    pub back: String,
    pub preamble: Option<String>,
    pub directory: PathBuf,
    pub rendered: Option<RenderedSides>,
}

impl TestCard {
    pub fn new(directory: impl Into<PathBuf>, front: &str, back: &str) -> Self {
        Self {
            front: front.to_string(),
            back: back.to_string(),
            preamble: None,
            directory: directory.into(),
            rendered: None,
        }
    }

    pub fn with_preamble(mut self, preamble: &str) -> Self {
        self.preamble = Some(preamble.to_string());
        self
    }

    pub fn front_svg(&self) -> String {
        let rendered = self.rendered.as_ref().expect("rendered");
        String::from_utf8(rendered.front.clone()).expect("utf-8 svg")
    }

    pub fn back_svg(&self) -> String {
        let rendered = self.rendered.as_ref().expect("rendered");
        String::from_utf8(rendered.back.clone()).expect("utf-8 svg")
    }
}

impl Flashcard for TestCard {
    fn as_typst(&self, front: bool) -> String {
        if front {
            self.front.clone()
        } else {
            self.back.clone()
        }
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

/// Log sink for asserting on emitted events.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log lock")).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's events into a buffer until the guard drops.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
