//! A single document row: raw bytes plus the rendered (tab-expanded)
//! projection and one highlight tag per rendered byte.
//!
//! Rows are only mutated through `Document`, which re-renders and
//! re-classifies them before returning so `rendered` and `highlight` always
//! describe the current `raw` bytes.

use crate::LineEnding;
use core_syntax::Highlight;

#[derive(Debug, Clone)]
pub struct Row {
    pub(crate) index: usize,
    pub(crate) raw: Vec<u8>,
    /// Terminator written after this row; None only for an unterminated last row.
    pub(crate) ending: Option<LineEnding>,
    pub(crate) rendered: Vec<u8>,
    pub(crate) highlight: Vec<Highlight>,
    pub(crate) open_comment: bool,
    /// Block-comment flag this row was last classified with (None = never classified).
    pub(crate) classified_with: Option<bool>,
}

impl Row {
    pub(crate) fn new(index: usize, raw: Vec<u8>, ending: Option<LineEnding>) -> Self {
        Self {
            index,
            raw,
            ending,
            rendered: Vec::new(),
            highlight: Vec::new(),
            open_comment: false,
            classified_with: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
    pub fn ending(&self) -> Option<LineEnding> {
        self.ending
    }
    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }
    /// True when the row ends inside an unterminated block comment.
    pub fn ends_in_block_comment(&self) -> bool {
        self.open_comment
    }
    /// Raw length in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Byte offset of the first occurrence of `needle` in the raw text.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        find_bytes(&self.raw, needle)
    }

    /// Map a raw column to its rendered column.
    pub fn cx_to_rx(&self, cx: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut rx = 0;
        for &b in &self.raw[..cx.min(self.raw.len())] {
            if b == b'\t' {
                rx += tab_width - rx % tab_width;
            } else {
                rx += 1;
            }
        }
        rx
    }

    /// Map a rendered column back to a raw column: the first raw column whose
    /// rendered column is `>= rx`, or the row length past the end.
    pub fn rx_to_cx(&self, rx: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut cur = 0;
        for (cx, &b) in self.raw.iter().enumerate() {
            if cur >= rx {
                return cx;
            }
            if b == b'\t' {
                cur += tab_width - cur % tab_width;
            } else {
                cur += 1;
            }
        }
        self.raw.len()
    }

    pub(crate) fn render(&mut self, tab_width: usize) {
        let tab_width = tab_width.max(1);
        self.rendered.clear();
        for &b in &self.raw {
            if b == b'\t' {
                self.rendered.push(b' ');
                while self.rendered.len() % tab_width != 0 {
                    self.rendered.push(b' ');
                }
            } else {
                self.rendered.push(b);
            }
        }
    }
}

pub(crate) fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
