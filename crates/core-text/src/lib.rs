//! Row store: the ordered sequence of document rows.
//!
//! Every mutation re-renders the touched rows and re-runs the syntax
//! classifier before returning, so readers never observe raw text without
//! matching highlight tags. Block-comment state that changes on one row is
//! propagated with an explicit worklist (see `Document::rehighlight`).
//!
//! Invariants (hold after every public call):
//! * `rows` is never empty; deleting the last row leaves one empty row.
//! * `rows[i].index == i`.
//! * `rows[i].highlight.len() == rows[i].rendered.len()`.

use core_syntax::Syntax;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

mod line_ending;
mod row;

pub use line_ending::{LineEnding, SourceLine, SplitText, split_lines};
pub use row::Row;

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// A position inside the document: raw column `x` within row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
    pub fn origin() -> Self {
        Self { x: 0, y: 0 }
    }
    pub fn clamp_to<F>(&mut self, row_count: usize, mut row_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if row_count == 0 {
            self.x = 0;
            self.y = 0;
            return;
        }
        if self.y >= row_count {
            self.y = row_count - 1;
        }
        let max_len = row_len_fn(self.y);
        if self.x > max_len {
            self.x = max_len;
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    dirty: bool,
    filename: Option<PathBuf>,
    /// Terminator given to rows created by edits.
    line_ending: LineEnding,
    syntax: Option<&'static Syntax>,
    tab_width: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

impl Document {
    /// Empty document (one empty row) for a new file.
    pub fn new(tab_width: usize) -> Self {
        let mut doc = Self {
            rows: vec![Row::new(0, Vec::new(), Some(LineEnding::Lf))],
            dirty: false,
            filename: None,
            line_ending: LineEnding::Lf,
            syntax: None,
            tab_width: tab_width.max(1),
        };
        doc.refresh_all();
        doc
    }

    /// Build a document from file bytes, remembering the line-ending convention.
    pub fn from_bytes(bytes: &[u8], tab_width: usize) -> Self {
        let split = split_lines(bytes);
        if split.mixed {
            tracing::warn!(target: "text.rows", ending = split.ending.label(), "mixed_line_endings");
        }
        let mut rows: Vec<Row> = split
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| Row::new(i, line.text, line.ending))
            .collect();
        if rows.is_empty() {
            rows.push(Row::new(0, Vec::new(), None));
        }
        let mut doc = Self {
            rows,
            dirty: false,
            filename: None,
            line_ending: split.ending,
            syntax: None,
            tab_width: tab_width.max(1),
        };
        doc.refresh_all();
        tracing::debug!(target: "text.rows", rows = doc.rows.len(), bytes = bytes.len(), "document_loaded");
        doc
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }
    /// Raw length of row `y` (0 when out of range).
    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, Row::len)
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
    pub fn has_trailing_newline(&self) -> bool {
        self.rows.last().is_some_and(|r| r.ending.is_some())
    }
    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Attach a file name and select the matching syntax profile.
    pub fn set_filename(&mut self, path: PathBuf) {
        let name = path.to_string_lossy().into_owned();
        self.filename = Some(path);
        self.set_syntax(core_syntax::select_for_name(&name));
    }

    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        for row in &mut self.rows {
            row.classified_with = None;
        }
        self.rehighlight(0, self.rows.len() - 1);
    }

    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.tab_width = tab_width.max(1);
        self.refresh_all();
    }

    /// Clamp `pos` into the document.
    pub fn clamp(&self, mut pos: Position) -> Position {
        pos.clamp_to(self.rows.len(), |y| self.row_len(y));
        pos
    }

    /// Insert a new row at `at` (clamped; `at == row_count` appends).
    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        let at = at.min(self.rows.len());
        let mut ending = Some(self.line_ending);
        if at == self.rows.len() {
            // Appending: the new last row inherits the old one's terminator.
            if let Some(last) = self.rows.last_mut() {
                ending = last.ending.replace(self.line_ending);
            }
        }
        self.rows.insert(at, Row::new(at, text.to_vec(), ending));
        self.renumber_from(at);
        self.rows[at].render(self.tab_width);
        self.rehighlight(at, at);
        self.dirty = true;
        tracing::trace!(target: "text.rows", op = "insert_row", at, len = text.len(), "edit");
    }

    /// Remove row `at`. Returns false when `at` is out of range.
    pub fn delete_row(&mut self, at: usize) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        let removed = self.rows.remove(at);
        if self.rows.is_empty() {
            self.rows.push(Row::new(0, Vec::new(), removed.ending));
            self.rows[0].render(self.tab_width);
        } else if at == self.rows.len() {
            self.rows[at - 1].ending = removed.ending;
        }
        self.renumber_from(at);
        // The row now at `at` has a new predecessor.
        let next = at.min(self.rows.len() - 1);
        self.rehighlight(next, next);
        self.dirty = true;
        tracing::trace!(target: "text.rows", op = "delete_row", at, "edit");
        true
    }

    /// Insert byte `c` into row `y` at column `at` (clamped to the row length).
    pub fn row_insert_char(&mut self, y: usize, at: usize, c: u8) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let at = at.min(row.raw.len());
        row.raw.insert(at, c);
        self.update_row(y);
    }

    /// Delete the byte at column `at` of row `y`. Returns false when out of range.
    pub fn row_delete_char(&mut self, y: usize, at: usize) -> bool {
        let Some(row) = self.rows.get_mut(y) else {
            return false;
        };
        if at >= row.raw.len() {
            return false;
        }
        row.raw.remove(at);
        self.update_row(y);
        true
    }

    pub fn row_append(&mut self, y: usize, s: &[u8]) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        row.raw.extend_from_slice(s);
        self.update_row(y);
    }

    /// Split row `y` at column `x`: the tail moves to a new row `y + 1`.
    pub fn split_row(&mut self, y: usize, x: usize) {
        if y >= self.rows.len() {
            return;
        }
        let x = x.min(self.rows[y].raw.len());
        let tail = self.rows[y].raw.split_off(x);
        let ending = self.rows[y].ending.replace(self.line_ending);
        self.rows.insert(y + 1, Row::new(y + 1, tail, ending));
        self.renumber_from(y + 1);
        self.rows[y].render(self.tab_width);
        self.rows[y + 1].render(self.tab_width);
        self.rehighlight(y, y + 1);
        self.dirty = true;
        tracing::trace!(target: "text.rows", op = "split_row", y, x, "edit");
    }

    /// Append row `y` onto row `y - 1` and remove it. Returns the join column in
    /// the previous row, or None for row 0 / out of range.
    pub fn merge_into_previous(&mut self, y: usize) -> Option<usize> {
        if y == 0 || y >= self.rows.len() {
            return None;
        }
        let moved = self.rows.remove(y);
        let join = self.rows[y - 1].raw.len();
        self.rows[y - 1].raw.extend_from_slice(&moved.raw);
        self.rows[y - 1].ending = moved.ending;
        self.renumber_from(y);
        self.rows[y - 1].render(self.tab_width);
        self.rehighlight(y - 1, y.min(self.rows.len() - 1));
        self.dirty = true;
        tracing::trace!(target: "text.rows", op = "merge_row", y, join, "edit");
        Some(join)
    }

    /// Insert possibly multi-line `text` at `pos` (rows split on `\n`, a `\r`
    /// before `\n` is dropped). Returns the position just after the inserted text.
    pub fn insert_text(&mut self, pos: Position, text: &[u8]) -> Position {
        let pos = self.clamp(pos);
        if text.is_empty() {
            return pos;
        }
        let mut parts = text
            .split(|b| *b == b'\n')
            .map(|p| p.strip_suffix(b"\r").unwrap_or(p));
        let first = parts.next().unwrap_or_default();
        let tail = self.rows[pos.y].raw.split_off(pos.x);
        let tail_ending = self.rows[pos.y].ending;
        self.rows[pos.y].raw.extend_from_slice(first);
        let mut end = Position::new(pos.x + first.len(), pos.y);
        for part in parts {
            self.rows[end.y].ending = Some(self.line_ending);
            end.y += 1;
            end.x = part.len();
            self.rows.insert(end.y, Row::new(end.y, part.to_vec(), tail_ending));
        }
        self.rows[end.y].raw.extend_from_slice(&tail);
        self.renumber_from(pos.y);
        for y in pos.y..=end.y {
            self.rows[y].render(self.tab_width);
        }
        self.rehighlight(pos.y, end.y);
        self.dirty = true;
        tracing::trace!(target: "text.rows", op = "insert_text", y = pos.y, x = pos.x, len = text.len(), "edit");
        end
    }

    /// Text between two positions (order-independent, end exclusive); rows are
    /// joined with `\n`.
    pub fn slice(&self, a: Position, b: Position) -> Vec<u8> {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let start = self.clamp(start);
        let end = self.clamp(end);
        let mut out = Vec::new();
        if start.y == end.y {
            out.extend_from_slice(&self.rows[start.y].raw[start.x..end.x.max(start.x)]);
            return out;
        }
        out.extend_from_slice(&self.rows[start.y].raw[start.x..]);
        for y in start.y + 1..end.y {
            out.push(b'\n');
            out.extend_from_slice(&self.rows[y].raw);
        }
        out.push(b'\n');
        out.extend_from_slice(&self.rows[end.y].raw[..end.x]);
        out
    }

    /// Raw column of the first occurrence of `needle` in row `y`.
    pub fn find_in_row(&self, y: usize, needle: &[u8]) -> Option<usize> {
        self.rows.get(y)?.find(needle)
    }

    /// Replace every non-overlapping occurrence of `query`. Returns the count.
    pub fn replace_all(&mut self, query: &[u8], replacement: &[u8]) -> usize {
        if query.is_empty() {
            return 0;
        }
        let mut total = 0;
        let mut first_changed = None;
        for y in 0..self.rows.len() {
            let raw = &self.rows[y].raw;
            if row::find_bytes(raw, query).is_none() {
                continue;
            }
            let mut out = Vec::with_capacity(raw.len());
            let mut i = 0;
            while i < raw.len() {
                if raw[i..].starts_with(query) {
                    out.extend_from_slice(replacement);
                    i += query.len();
                    total += 1;
                } else {
                    out.push(raw[i]);
                    i += 1;
                }
            }
            self.rows[y].raw = out;
            self.rows[y].render(self.tab_width);
            if first_changed.is_none() {
                first_changed = Some(y);
            }
            self.rehighlight(y, y);
        }
        if let Some(y) = first_changed {
            self.dirty = true;
            tracing::debug!(target: "text.rows", op = "replace_all", first_row = y, count = total, "edit");
        }
        total
    }

    /// Serialize all rows, each followed by its own terminator.
    pub fn rows_to_string(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rows.iter().map(|r| r.raw.len() + 2).sum());
        let last = self.rows.len() - 1;
        for (i, row) in self.rows.iter().enumerate() {
            out.extend_from_slice(&row.raw);
            match row.ending {
                Some(ending) => out.extend_from_slice(ending.as_bytes()),
                // only the last row may be unterminated
                None if i < last => out.extend_from_slice(self.line_ending.as_bytes()),
                None => {}
            }
        }
        out
    }

    fn update_row(&mut self, y: usize) {
        self.rows[y].render(self.tab_width);
        self.rehighlight(y, y);
        self.dirty = true;
    }

    fn renumber_from(&mut self, at: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.index = i;
        }
    }

    fn refresh_all(&mut self) {
        for row in &mut self.rows {
            row.render(self.tab_width);
            row.classified_with = None;
        }
        self.rehighlight(0, self.rows.len() - 1);
    }

    /// Classify rows `start..=through` unconditionally, then keep going while the
    /// next row was classified with a block-comment flag different from its
    /// predecessor's current flag. Stops at the first consistent row or at the
    /// end of the document.
    fn rehighlight(&mut self, start: usize, through: usize) {
        let mut pending = std::collections::VecDeque::from([start]);
        let mut cascaded = 0usize;
        while let Some(y) = pending.pop_front() {
            let prev_open = y > 0 && self.rows[y - 1].open_comment;
            let row = &mut self.rows[y];
            row.open_comment =
                core_syntax::classify_into(&mut row.highlight, &row.rendered, prev_open, self.syntax);
            row.classified_with = Some(prev_open);
            debug_assert_eq!(row.highlight.len(), row.rendered.len());

            let next = y + 1;
            if next >= self.rows.len() {
                continue;
            }
            if next <= through {
                pending.push_back(next);
            } else if self.rows[next].classified_with != Some(self.rows[y].open_comment) {
                cascaded += 1;
                pending.push_back(next);
            }
        }
        if cascaded > 0 {
            tracing::trace!(target: "syntax", start, through, cascaded, "comment_cascade");
        }
    }
}
