//! Card types.

/// Card parsed from a deck file (may not have an ID).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCard {
    pub id: Option<i64>,
    pub question: String,
    pub answer: String,
    pub line_number: usize,
}

impl RawCard {
    /// File-local label: the ID when present, `L<line>` otherwise.
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => format!("L{}", self.line_number),
        }
    }
}
