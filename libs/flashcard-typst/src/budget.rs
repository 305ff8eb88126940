//! Process-wide cap on concurrently running compiler processes.

use std::thread;

use tokio::sync::Semaphore;

/// Budget used when the CPU count cannot be determined.
pub const FALLBACK_BUDGET: usize = 10;

/// Maximum number of compiler processes allowed to run at once.
///
/// Always at least 1 and at most [`Semaphore::MAX_PERMITS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyBudget(usize);

impl ConcurrencyBudget {
    /// Derive the budget from a logical CPU count: `round(1.5 * n)`, ties to even.
    pub fn from_cpu_count(cpus: Option<usize>) -> Self {
        match cpus {
            Some(n) => Self::fixed((1.5 * n as f64).round_ties_even() as usize),
            None => Self(FALLBACK_BUDGET),
        }
    }

    /// Derive the budget from the CPUs available to this process.
    pub fn detect() -> Self {
        let cpus = thread::available_parallelism().ok().map(|n| n.get());
        Self::from_cpu_count(cpus)
    }

    /// An explicit budget.
    pub fn fixed(limit: usize) -> Self {
        Self(limit.clamp(1, Semaphore::MAX_PERMITS))
    }

    pub fn get(self) -> usize {
        self.0
    }
}
