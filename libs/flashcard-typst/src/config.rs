//! Compiler configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::budget::ConcurrencyBudget;

/// How to reach the Typst binary and how hard to drive it.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Executable to run, looked up on `PATH` when relative.
    pub typst_cmd: PathBuf,
    /// Passed as `--root`; bounds which files the markup may import.
    pub root_dir: PathBuf,
    /// Overrides the CPU-derived budget.
    pub max_processes: Option<usize>,
    /// Per-invocation deadline. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl CompilerConfig {
    pub fn new(typst_cmd: impl Into<PathBuf>, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            typst_cmd: typst_cmd.into(),
            root_dir: root_dir.into(),
            max_processes: None,
            timeout: None,
        }
    }

    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = Some(max_processes);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Budget to enforce: the override when set, otherwise derived from the CPUs.
    pub fn budget(&self) -> ConcurrencyBudget {
        self.max_processes
            .map(ConcurrencyBudget::fixed)
            .unwrap_or_else(ConcurrencyBudget::detect)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new("typst", ".")
    }
}
