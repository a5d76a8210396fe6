//! `line[:column]` goto targets.

use core_text::{Document, Position};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GotoError {
    #[error("Goto: empty input")]
    Empty,

    #[error("Goto: invalid line:column '{0}'")]
    Malformed(String),
}

/// 1-based target as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GotoTarget {
    pub line: usize,
    pub column: Option<usize>,
}

/// Parse `line` or `line:column` (surrounding whitespace ignored).
pub fn parse_goto(input: &str) -> Result<GotoTarget, GotoError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(GotoError::Empty);
    }
    let malformed = || GotoError::Malformed(trimmed.to_string());
    let (line, column) = match trimmed.split_once(':') {
        Some((l, c)) => (l, Some(c)),
        None => (trimmed, None),
    };
    let parse = |s: &str| -> Result<usize, GotoError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        s.parse::<usize>().map_err(|_| malformed())
    };
    Ok(GotoTarget {
        line: parse(line)?,
        column: column.map(parse).transpose()?,
    })
}

impl GotoTarget {
    /// Clamp into `doc`: line to `1..=row_count`, column to `1..=len + 1`.
    pub fn resolve(&self, doc: &Document) -> Position {
        let y = self.line.clamp(1, doc.row_count()) - 1;
        let x = match self.column {
            Some(c) => (c.max(1) - 1).min(doc.row_len(y)),
            None => 0,
        };
        Position::new(x, y)
    }
}
