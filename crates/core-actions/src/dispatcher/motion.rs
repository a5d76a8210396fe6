//! Motion sub-dispatch (cursor movement).
//!
//! Left at column 0 wraps to the end of the previous row and Right at the end
//! of a row wraps to the start of the next. Vertical motions keep the
//! rendered column, so moving past tabs keeps the cursor visually in place;
//! inside a tab it snaps to the column after the tab. Page motions first jump to the top (bottom) screen row
//! and then move a full screen. Selection mode needs no work here: the span
//! is always anchor..cursor.

use super::DispatchResult;
use crate::MotionKind;
use core_state::EditorState;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let before = state.view.cursor;
    let doc = &state.doc;
    let last_row = doc.row_count() - 1;
    let mut c = doc.clamp(before);
    let tab_width = doc.tab_width();
    let rx = doc.row(c.y).map_or(0, |r| r.cx_to_rx(c.x, tab_width));
    let from_y = c.y;
    match kind {
        MotionKind::Left => {
            if c.x > 0 {
                c.x -= 1;
            } else if c.y > 0 {
                c.y -= 1;
                c.x = doc.row_len(c.y);
            }
        }
        MotionKind::Right => {
            if c.x < doc.row_len(c.y) {
                c.x += 1;
            } else if c.y < last_row {
                c.y += 1;
                c.x = 0;
            }
        }
        MotionKind::Up => c.y = c.y.saturating_sub(1),
        MotionKind::Down => c.y = (c.y + 1).min(last_row),
        MotionKind::LineStart => c.x = 0,
        MotionKind::LineEnd => c.x = doc.row_len(c.y),
        MotionKind::PageUp => {
            let page = state.text_rows();
            c.y = state.view.row_offset.min(last_row).saturating_sub(page);
        }
        MotionKind::PageDown => {
            let page = state.text_rows();
            let bottom = (state.view.row_offset + page.saturating_sub(1)).min(last_row);
            c.y = (bottom + page).min(last_row);
        }
    }
    let vertical = matches!(
        kind,
        MotionKind::Up | MotionKind::Down | MotionKind::PageUp | MotionKind::PageDown
    );
    if vertical && c.y != from_y {
        c.x = doc.row(c.y).map_or(0, |r| r.rx_to_cx(rx, tab_width));
    }
    c.x = c.x.min(doc.row_len(c.y));
    state.view.cursor = c;
    tracing::trace!(target: "actions.dispatch", op = ?kind, from_x = before.x, from_y = before.y, to_x = c.x, to_y = c.y, "motion");
    if c == before {
        DispatchResult::clean()
    } else {
        DispatchResult::dirty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Settings;
    use core_text::{DEFAULT_TAB_WIDTH, Document, Position};

    fn state(text: &str, cursor: Position) -> EditorState {
        let mut st = EditorState::new(
            Document::from_bytes(text.as_bytes(), DEFAULT_TAB_WIDTH),
            Settings::default(),
        );
        st.view.cursor = cursor;
        st.set_screen_size(12, 80);
        st
    }

    /// Cursor position after `kind`, leaving `state` untouched.
    fn moved(state: &EditorState, kind: MotionKind) -> Position {
        let mut scratch = EditorState::new(state.doc.clone(), state.settings.clone());
        scratch.view = state.view;
        scratch.set_screen_size(state.screen_rows, state.screen_cols);
        handle_motion(kind, &mut scratch);
        scratch.view.cursor
    }

    #[test]
    fn horizontal_wraps_across_rows() {
        let st = state("ab\ncd\n", Position::new(0, 1));
        assert_eq!(moved(&st, MotionKind::Left), Position::new(2, 0));
        let st = state("ab\ncd\n", Position::new(2, 0));
        assert_eq!(moved(&st, MotionKind::Right), Position::new(0, 1));
    }

    #[test]
    fn edges_of_document_do_not_move() {
        let st = state("ab\ncd\n", Position::origin());
        assert_eq!(moved(&st, MotionKind::Left), Position::origin());
        assert_eq!(moved(&st, MotionKind::Up), Position::origin());
        let st = state("ab\ncd\n", Position::new(2, 1));
        assert_eq!(moved(&st, MotionKind::Right), Position::new(2, 1));
        assert_eq!(moved(&st, MotionKind::Down), Position::new(2, 1));
    }

    #[test]
    fn vertical_clamps_column() {
        let st = state("long line\nab\n", Position::new(8, 0));
        assert_eq!(moved(&st, MotionKind::Down), Position::new(2, 1));
    }

    #[test]
    fn vertical_keeps_rendered_column_across_tabs() {
        // after the tab: rendered column 4
        let st = state("\tx\nabcdef\n", Position::new(1, 0));
        assert_eq!(moved(&st, MotionKind::Down), Position::new(4, 1));
        // rendered column 2 falls inside the tab and snaps past it
        let st = state("\tx\nabcdef\n", Position::new(2, 1));
        assert_eq!(moved(&st, MotionKind::Up), Position::new(1, 0));
    }

    #[test]
    fn home_and_end() {
        let st = state("hello\n", Position::new(2, 0));
        assert_eq!(moved(&st, MotionKind::LineStart), Position::new(0, 0));
        assert_eq!(moved(&st, MotionKind::LineEnd), Position::new(5, 0));
    }

    #[test]
    fn page_motions_move_a_screen() {
        let text = "x\n".repeat(100);
        // 10 text rows
        let mut st = state(&text, Position::new(0, 3));
        assert_eq!(moved(&st, MotionKind::PageDown), Position::new(0, 19));
        st.view.row_offset = 40;
        st.view.cursor = Position::new(0, 45);
        assert_eq!(moved(&st, MotionKind::PageUp), Position::new(0, 30));
        assert_eq!(moved(&st, MotionKind::PageDown), Position::new(0, 59));
        st.view.row_offset = 95;
        st.view.cursor = Position::new(0, 97);
        assert_eq!(moved(&st, MotionKind::PageDown), Position::new(0, 99));
        st.view.row_offset = 3;
        assert_eq!(moved(&st, MotionKind::PageUp), Position::new(0, 0));
    }

    #[test]
    fn unchanged_cursor_is_clean() {
        let mut st = state("ab\n", Position::origin());
        assert!(!handle_motion(MotionKind::Up, &mut st).dirty);
        assert!(handle_motion(MotionKind::Right, &mut st).dirty);
    }
}
