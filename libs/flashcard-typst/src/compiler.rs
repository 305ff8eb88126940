//! Single invocations of the external Typst compiler.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Instant;

use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::budget::ConcurrencyBudget;
use crate::config::CompilerConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{CompileError, Result};

/// Upper bound of the random number in temporary file names.
const TEMP_NAME_RANGE: u128 = 1_000_000_000;

/// Runs `typst compile` and renders flashcards with it.
///
/// The budget is fixed at construction time.
#[derive(Debug, Clone)]
pub struct TypstCompiler {
    config: CompilerConfig,
    budget: ConcurrencyBudget,
}

impl TypstCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        let budget = config.budget();
        Self { config, budget }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn budget(&self) -> ConcurrencyBudget {
        self.budget
    }

    /// Compile `source` to SVG with exactly one compiler process.
    ///
    /// The source is written to a randomly named `tmp_<n>.typ` inside
    /// `directory`, which is removed again before this returns, whatever the
    /// outcome. Warnings are logged; only an `error: ` diagnostic fails the
    /// call. The exit status is not consulted.
    pub async fn compile(&self, source: &str, directory: &Path) -> Result<Vec<u8>> {
        let started_at = Instant::now();
        let input = TempInput::create(directory, source).await?;
        let output = self.run(input.path()).await;
        input.remove().await;
        let output = output?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        match Diagnostics::classify(&stderr) {
            Diagnostics::Fatal(diagnostics) => {
                debug!(
                    op = "typst::compile",
                    result = "error",
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    exit_code = ?output.status.code(),
                    "Typst reported a compilation error"
                );
                return Err(CompileError::Fatal { diagnostics });
            }
            Diagnostics::Warning(diagnostics) => {
                warn!(
                    op = "typst::compile",
                    directory = %directory.display(),
                    "Typst compilation warning:\n{diagnostics}"
                );
            }
            Diagnostics::Clean => {}
        }

        debug!(
            op = "typst::compile",
            result = "ok",
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            svg_bytes = output.stdout.len(),
            "Typst invocation finished"
        );
        Ok(output.stdout)
    }

    async fn run(&self, input: &Path) -> Result<Output> {
        let child = Command::new(&self.config.typst_cmd)
            .arg("compile")
            .arg(input)
            .arg("-")
            .arg("--root")
            .arg(&self.config.root_dir)
            .arg("--format")
            .arg("svg")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CompileError::Spawn {
                program: self.config.typst_cmd.clone(),
                source,
            })?;

        // Dropping the pending output on timeout drops the child, which kills it.
        let output = child.wait_with_output();
        let output = match self.config.timeout {
            Some(after) => tokio::time::timeout(after, output).await.map_err(|_| {
                warn!(
                    op = "typst::compile",
                    result = "timeout",
                    timeout_ms = after.as_millis() as u64,
                    input = %input.display(),
                    "Typst did not finish in time; killing it"
                );
                CompileError::Timeout { after }
            })?,
            None => output.await,
        };
        output.map_err(CompileError::Wait)
    }
}

/// Temporary compiler input, deleted when removed or dropped.
#[derive(Debug)]
struct TempInput {
    path: PathBuf,
    armed: bool,
}

impl TempInput {
    async fn create(directory: &Path, source: &str) -> Result<Self> {
        let input = Self {
            path: directory.join(temp_file_name()),
            armed: true,
        };
        tokio::fs::write(&input.path, source)
            .await
            .map_err(|source| CompileError::TempFile {
                path: input.path.clone(),
                source,
            })?;
        Ok(input)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn remove(mut self) {
        let result = tokio::fs::remove_file(&self.path).await;
        self.armed = false;
        if let Err(err) = result {
            warn!(
                op = "typst::compile",
                path = %self.path.display(),
                error = %err,
                "Failed to remove temporary Typst input"
            );
        }
    }
}

impl Drop for TempInput {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Failed to remove abandoned Typst input"
                );
            }
        }
    }
}

/// `tmp_<n>.typ` with `n` uniformly drawn from `1..=1_000_000_000`.
fn temp_file_name() -> String {
    let n = Uuid::new_v4().as_u128() % TEMP_NAME_RANGE + 1;
    format!("tmp_{n}.typ")
}
