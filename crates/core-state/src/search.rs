//! Incremental search session.
//!
//! The scan is row based: each step moves one row in the search direction
//! (wrapping at either end) and reports the first occurrence of the query in
//! that row. Changing the query resets `last_match`, so the next step starts
//! again from row 0.

use core_text::{Document, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// Cursor and offsets captured when the search started, restored on cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedView {
    pub cursor: Position,
    pub row_offset: usize,
    pub column_offset: usize,
}

/// A hit: raw column `x` of row `y`, `len` bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub y: usize,
    pub x: usize,
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    query: Vec<u8>,
    last_match: Option<usize>,
    direction: SearchDirection,
    saved: SavedView,
}

impl SearchSession {
    pub fn new(saved: SavedView) -> Self {
        Self {
            query: Vec::new(),
            last_match: None,
            direction: SearchDirection::Forward,
            saved,
        }
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn saved(&self) -> SavedView {
        self.saved
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Replace the query; the next scan restarts from the first row.
    pub fn set_query(&mut self, query: &[u8]) {
        if self.query != query {
            self.query = query.to_vec();
            self.last_match = None;
            self.direction = SearchDirection::Forward;
        }
    }

    pub fn set_direction(&mut self, direction: SearchDirection) {
        self.direction = direction;
    }

    /// Scan from the row after (or before) the last match, wrapping around
    /// the document once. Without a previous match the scan always runs
    /// forward from row 0.
    pub fn find_next(&mut self, doc: &Document) -> Option<SearchMatch> {
        if self.query.is_empty() {
            return None;
        }
        let rows = doc.row_count();
        let direction = if self.last_match.is_none() {
            SearchDirection::Forward
        } else {
            self.direction
        };
        let mut current = self.last_match;
        for _ in 0..rows {
            let y = match (current, direction) {
                (None, _) => 0,
                (Some(y), SearchDirection::Forward) => (y + 1) % rows,
                (Some(0), SearchDirection::Backward) => rows - 1,
                (Some(y), SearchDirection::Backward) => y - 1,
            };
            current = Some(y);
            if let Some(x) = doc.find_in_row(y, &self.query) {
                self.last_match = Some(y);
                tracing::trace!(target: "actions.dispatch", y, x, "search_match");
                return Some(SearchMatch {
                    y,
                    x,
                    len: self.query.len(),
                });
            }
        }
        None
    }
}
