//! Parser for plain-text deck files.
//!
//! # Format
//! ```markdown
//! ID: 1
//! Q: What is $integral_0^1 x dif x$?
//! A: $1/2$
//!
//! Q: Cards without an ID are allowed
//! A: Answers may span
//! several lines.
//! ```
//!
//! Card text is passed through untouched, so it can hold Typst markup.

use crate::error::{ParseError, Result};
use crate::types::RawCard;
use std::collections::HashSet;

/// Parse deck content into cards, in file order.
pub fn parse(content: &str) -> Result<Vec<RawCard>> {
    let mut parser = Parser::default();
    for (idx, line) in content.lines().enumerate() {
        parser.line(line, idx + 1)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
}

struct Pending {
    id: Option<i64>,
    start_line: usize,
    question: Option<Vec<String>>,
    answer: Option<Vec<String>>,
    field: Option<Field>,
}

impl Pending {
    fn new(id: Option<i64>, start_line: usize) -> Self {
        Self {
            id,
            start_line,
            question: None,
            answer: None,
            field: None,
        }
    }

    fn push_text(&mut self, text: &str) {
        let target = match self.field {
            Some(Field::Question) => self.question.as_mut(),
            Some(Field::Answer) => self.answer.as_mut(),
            None => None,
        };
        if let Some(lines) = target {
            lines.push(text.to_string());
        }
    }

    fn build(self) -> Result<RawCard> {
        let question = self.question.ok_or(ParseError::MissingQuestion {
            line: self.start_line,
        })?;
        let answer = self.answer.ok_or(ParseError::MissingAnswer {
            line: self.start_line,
        })?;

        Ok(RawCard {
            id: self.id,
            question: question.join("\n").trim().to_string(),
            answer: answer.join("\n").trim().to_string(),
            line_number: self.start_line,
        })
    }
}

#[derive(Default)]
struct Parser {
    current: Option<Pending>,
    cards: Vec<RawCard>,
    seen_ids: HashSet<i64>,
}

impl Parser {
    fn line(&mut self, line: &str, line_num: usize) -> Result<()> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("ID:") {
            let value = rest.trim();
            let id = value.parse::<i64>().map_err(|_| ParseError::InvalidId {
                line: line_num,
                value: value.to_string(),
            })?;
            self.close()?;
            self.current = Some(Pending::new(Some(id), line_num));
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            // An `ID:` line opens a card whose question has not been seen yet.
            let reuse = matches!(&self.current, Some(card) if card.question.is_none());
            if !reuse {
                self.close()?;
                self.current = Some(Pending::new(None, line_num));
            }
            if let Some(card) = self.current.as_mut() {
                card.question = Some(vec![rest.trim().to_string()]);
                card.field = Some(Field::Question);
            }
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            let card = match self.current.as_mut() {
                Some(card) if card.answer.is_none() => card,
                _ => return Err(ParseError::MissingQuestion { line: line_num }),
            };
            if card.question.is_none() {
                return Err(ParseError::MissingQuestion {
                    line: card.start_line,
                });
            }
            card.answer = Some(vec![rest.trim().to_string()]);
            card.field = Some(Field::Answer);
        } else if let Some(card) = self.current.as_mut() {
            card.push_text(line);
        }

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(pending) = self.current.take() else {
            return Ok(());
        };
        let card = pending.build()?;
        if let Some(id) = card.id {
            if !self.seen_ids.insert(id) {
                return Err(ParseError::DuplicateId {
                    id,
                    line: card.line_number,
                });
            }
        }
        self.cards.push(card);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<RawCard>> {
        self.close()?;
        Ok(self.cards)
    }
}
