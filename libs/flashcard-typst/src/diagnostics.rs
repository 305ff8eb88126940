//! Classification of the compiler's standard error.

/// Marker that turns compiler diagnostics into a hard failure.
pub const FATAL_MARKER: &str = "\nerror: ";

/// What the compiler said on stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostics {
    /// Nothing was written to stderr.
    Clean,
    /// Non-empty stderr without an error line; the output is still usable.
    Warning(String),
    /// At least one `error: ` line; the output must be discarded.
    Fatal(String),
}

impl Diagnostics {
    /// Classify raw stderr text. An `error: ` at the very start counts too.
    pub fn classify(stderr: &str) -> Self {
        if stderr.is_empty() {
            return Self::Clean;
        }
        if format!("\n{stderr}").contains(FATAL_MARKER) {
            Self::Fatal(stderr.to_string())
        } else {
            Self::Warning(stderr.to_string())
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}
