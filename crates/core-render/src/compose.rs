//! Frame composition.
//!
//! One frame is: hide cursor, home, every text row, status bar, message line,
//! cursor placement, show cursor. Rows are written top to bottom with `\r\n`
//! separators and a clear-to-EOL each, so no full-screen clear is needed and
//! the frame does not flicker.
//!
//! Colour escapes are emitted only when the effective highlight class changes
//! along a row. Selection and the current search match override syntax tags
//! with `Highlight::Match` for display only; the row store is never touched.

use crate::status::{StatusContext, compose_status, format_status};
use crate::writer::{FrameStats, FrameWriter};
use core_state::EditorState;
use core_syntax::Highlight;
use core_text::Row;
use std::time::Instant;

const WELCOME: &str = concat!("bric editor -- version ", env!("CARGO_PKG_VERSION"));

/// Rendered column range `[from, to)` that displays as a match.
type Span = (usize, usize);

/// Compose one full frame for `state` (view offsets must already be scrolled).
pub fn compose_frame(state: &EditorState, now: Instant) -> (Vec<u8>, FrameStats) {
    let text_rows = state.text_rows();
    let mut w = FrameWriter::with_capacity(state.screen_rows * (state.screen_cols + 16));
    let mut rows_drawn = 0;

    w.hide_cursor();
    w.move_to(0, 0);
    w.background(state.settings.colours.background);
    for y in 0..text_rows {
        let file_row = y + state.view.row_offset;
        match state.doc.row(file_row) {
            Some(row) => {
                draw_row(&mut w, state, row);
                rows_drawn += 1;
            }
            None => draw_filler(&mut w, state, y, text_rows),
        }
        w.clear_to_eol();
        w.newline();
    }

    draw_status_bar(&mut w, state);
    draw_message_line(&mut w, state, now);

    let (cx, cy) = cursor_screen_position(state);
    w.move_to(cx, cy);
    w.show_cursor();

    let colour_changes = w.colour_changes();
    let bytes = w.finish();
    let stats = FrameStats {
        bytes: bytes.len(),
        colour_changes,
        rows_drawn,
    };
    (bytes, stats)
}

fn draw_row(w: &mut FrameWriter, state: &EditorState, row: &Row) {
    let colours = &state.settings.colours;
    let gutter = state.gutter_width();
    if gutter > 0 {
        w.text(&format!("{:>width$}: ", row.index() + 1, width = gutter - 2));
    }

    let rendered = row.rendered();
    let tags = row.highlight();
    let start = state.view.column_offset.min(rendered.len());
    let len = (rendered.len() - start).min(state.text_cols());
    let overlays = overlay_spans(state, row);

    let mut current: Option<u8> = None;
    for rx in start..start + len {
        let c = rendered[rx];
        let tag = if overlays.iter().any(|(a, b)| (*a..*b).contains(&rx)) {
            Highlight::Match
        } else {
            tags[rx]
        };

        if c.is_ascii_control() {
            let sym = if c <= 26 { b'@' + c } else { b'?' };
            w.reverse();
            w.byte(sym);
            w.no_reverse();
            continue;
        }
        if tag == Highlight::Normal {
            if current.is_some() {
                w.sgr(colours.default);
                current = None;
            }
        } else {
            let code = colours.sgr(tag);
            if current != Some(code) {
                w.sgr(code);
                current = Some(code);
            }
        }
        w.byte(c);
    }
    if current.is_some() {
        w.sgr(colours.default);
    }
}

/// Rendered spans of `row` covered by the selection or the search match.
fn overlay_spans(state: &EditorState, row: &Row) -> Vec<Span> {
    let tab_width = state.doc.tab_width();
    let y = row.index();
    let mut spans = Vec::new();
    if let Some(sel) = state.selection()
        && let Some((from, to)) = sel.row_range(y, row.len())
    {
        spans.push((row.cx_to_rx(from, tab_width), row.cx_to_rx(to, tab_width)));
    }
    if let Some(m) = state.search_match
        && m.y == y
    {
        spans.push((
            row.cx_to_rx(m.x, tab_width),
            row.cx_to_rx(m.x + m.len, tab_width),
        ));
    }
    spans
}

fn draw_filler(w: &mut FrameWriter, state: &EditorState, y: usize, text_rows: usize) {
    let doc = &state.doc;
    let empty_unnamed = doc.filename().is_none() && doc.row_count() == 1 && doc.row_len(0) == 0;
    if empty_unnamed && y == text_rows / 3 {
        let width = state.screen_cols;
        let banner = &WELCOME[..WELCOME.len().min(width)];
        let mut padding = (width - banner.len()) / 2;
        if padding > 0 {
            w.byte(b'~');
            padding -= 1;
        }
        w.bytes(&b" ".repeat(padding));
        w.text(banner);
    } else {
        w.byte(b'~');
    }
}

fn draw_status_bar(w: &mut FrameWriter, state: &EditorState) {
    let ctx = StatusContext::from_state(state);
    let line = format_status(&compose_status(&ctx), state.screen_cols);
    w.reverse();
    w.text(&line);
    w.reset();
    w.newline();
}

fn draw_message_line(w: &mut FrameWriter, state: &EditorState, now: Instant) {
    w.clear_to_eol();
    let text = match &state.prompt {
        Some(p) => Some(p.display()),
        None => state.visible_status(now).map(str::to_owned),
    };
    if let Some(text) = text {
        let bytes = text.as_bytes();
        w.bytes(&bytes[..bytes.len().min(state.screen_cols)]);
    }
}

fn cursor_screen_position(state: &EditorState) -> (u16, u16) {
    let x = state.gutter_width() + state.cursor_rx().saturating_sub(state.view.column_offset);
    let y = state.view.cursor.y.saturating_sub(state.view.row_offset);
    (
        u16::try_from(x).unwrap_or(u16::MAX),
        u16::try_from(y).unwrap_or(u16::MAX),
    )
}
