//! Status bar composition.
//!
//! Two-stage pipeline: [`compose_status`] produces ordered segments from a
//! [`StatusContext`], [`format_status`] lays them out into exactly `width`
//! columns. Left side: file name (at most 20 bytes), line count, modified
//! marker and the selection-mode tag. Right side: syntax name and
//! `line/total`, flushed to the right edge when it fits.

use core_state::{EditorState, Mode};
use std::borrow::Cow;
use std::path::Path;

const NAME_MAX: usize = 20;

pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub rows: usize,
    pub dirty: bool,
    pub mode: Mode,
    pub syntax: Option<&'static str>,
    /// 0-based cursor row.
    pub line: usize,
}

impl<'a> StatusContext<'a> {
    pub fn from_state(state: &'a EditorState) -> Self {
        Self {
            file_name: state.doc.filename(),
            rows: state.doc.row_count(),
            dirty: state.doc.is_dirty(),
            mode: state.mode,
            syntax: state.doc.syntax().map(|s| s.name),
            line: state.view.cursor.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    Modified,
    Mode(&'static str),
    Syntax(&'static str),
    Position { line_1: usize, total: usize },
}

pub fn compose_status<'a>(ctx: &'a StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'_, str> = match ctx.file_name {
        Some(p) => p.to_string_lossy(),
        None => "[No Name]".into(),
    };
    let mut out = Vec::with_capacity(6);
    out.push(StatusSegment::FileName(name));
    out.push(StatusSegment::LineCount(ctx.rows));
    if ctx.dirty {
        out.push(StatusSegment::Modified);
    }
    if ctx.mode == Mode::Select {
        out.push(StatusSegment::Mode("SELECT"));
    }
    out.push(StatusSegment::Syntax(ctx.syntax.unwrap_or("no ft")));
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        total: ctx.rows,
    });
    out
}

/// Lay segments out into exactly `width` bytes.
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let mut left = String::with_capacity(width);
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => left.push_str(truncate(name, NAME_MAX)),
            StatusSegment::LineCount(n) => left.push_str(&format!(" - {n} lines")),
            StatusSegment::Modified => left.push_str(" (modified)"),
            StatusSegment::Mode(m) => {
                left.push_str(" [");
                left.push_str(m);
                left.push(']');
            }
            StatusSegment::Syntax(s) => right.push_str(s),
            StatusSegment::Position { line_1, total } => {
                right.push_str(&format!(" | {line_1}/{total}"))
            }
        }
    }

    let mut s = String::from(truncate(&left, width));
    let used = s.len();
    if used + right.len() <= width {
        s.push_str(&" ".repeat(width - used - right.len()));
        s.push_str(&right);
    } else {
        s.push_str(&" ".repeat(width - used));
    }
    s
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
