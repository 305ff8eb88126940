//! Shared Typst preamble.

/// Prepended to every card that does not bring its own preamble.
///
/// Defines `#flashcard(id, front, back)`, which card markup is expected to call.
pub const DEFAULT_PREAMBLE: &str = r#"
#set text(size: 20pt)
#set page(width: auto, height: auto, margin: (rest: 8pt))
#let flashcard(id, front, back) = {
  strong(front)
  [\ ]
  back
}
"#;

/// Full source for one side: preamble, a newline, then the side's markup.
pub fn assemble(preamble: Option<&str>, markup: &str) -> String {
    let preamble = preamble.unwrap_or(DEFAULT_PREAMBLE);
    format!("{preamble}\n{markup}")
}
