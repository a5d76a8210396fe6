//! Selection span and the in-process clipboard.

use core_text::{Document, Position};

/// Half-open span `[start, end)` between the selection anchor and the cursor,
/// normalized so `start <= end` (row, then column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub start: Position,
    pub end: Position,
}

impl SelectionSpan {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Raw column range `[from, to)` of row `y` covered by the span, or None
    /// when the row is outside it. Rows strictly inside cover their full length.
    pub fn row_range(&self, y: usize, row_len: usize) -> Option<(usize, usize)> {
        if y < self.start.y || y > self.end.y {
            return None;
        }
        let from = if y == self.start.y { self.start.x } else { 0 };
        let to = if y == self.end.y { self.end.x } else { row_len };
        let (from, to) = (from.min(row_len), to.min(row_len));
        (from < to).then_some((from, to))
    }

    /// Text covered by the span, rows joined with `\n`.
    pub fn text(&self, doc: &Document) -> Vec<u8> {
        doc.slice(self.start, self.end)
    }
}

/// Single clipboard buffer, replaced wholesale by copy or yank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    text: Vec<u8>,
    /// Set by row yank: paste inserts a new row instead of splicing.
    linewise: bool,
}

impl Clipboard {
    pub fn set_chars(&mut self, text: Vec<u8>) {
        self.text = text;
        self.linewise = false;
    }

    pub fn set_line(&mut self, row: Vec<u8>) {
        self.text = row;
        self.linewise = true;
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn is_linewise(&self) -> bool {
        self.linewise
    }

    /// Nothing has been copied yet. A yanked empty row still counts as content.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && !self.linewise
    }
}
