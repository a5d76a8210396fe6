//! Selection mode, copy, row yank and paste.

use super::DispatchResult;
use core_state::{EditorState, Mode, SELECTION_MESSAGE};
use core_text::Position;

pub(crate) fn toggle(state: &mut EditorState) -> DispatchResult {
    if state.mode == Mode::Select {
        state.exit_selection();
        state.status = None;
    } else {
        state.enter_selection();
        state.set_status(SELECTION_MESSAGE);
    }
    DispatchResult::dirty()
}

pub(crate) fn select_all(state: &mut EditorState) -> DispatchResult {
    state.select_all();
    state.set_status(SELECTION_MESSAGE);
    DispatchResult::dirty()
}

/// Copy the span into the clipboard and leave selection mode. The document
/// is not touched.
pub(crate) fn copy(state: &mut EditorState) -> DispatchResult {
    let Some(span) = state.selection() else {
        state.set_status("Nothing selected (Ctrl-D starts a selection)");
        return DispatchResult::dirty();
    };
    let text = span.text(&state.doc);
    let len = text.len();
    state.clipboard.set_chars(text);
    state.exit_selection();
    tracing::debug!(target: "actions.dispatch", op = "copy", bytes = len, "clipboard");
    state.set_status(format!("Copied {len} bytes"));
    DispatchResult::dirty()
}

pub(crate) fn yank_row(state: &mut EditorState) -> DispatchResult {
    state.clamp_cursor();
    let y = state.view.cursor.y;
    let row = state.doc.row(y).map(|r| r.raw().to_vec()).unwrap_or_default();
    tracing::debug!(target: "actions.dispatch", op = "yank_row", y, bytes = row.len(), "clipboard");
    state.clipboard.set_line(row);
    state.set_status(format!("Yanked row {}", y + 1));
    DispatchResult::dirty()
}

/// Linewise content lands on a new row below the cursor row; characterwise
/// content is spliced in at the cursor, which ends up after the inserted text.
pub(crate) fn paste(state: &mut EditorState) -> DispatchResult {
    if state.mode == Mode::Select {
        return DispatchResult::clean();
    }
    if state.clipboard.is_empty() {
        state.set_status("Clipboard is empty");
        return DispatchResult::dirty();
    }
    state.clamp_cursor();
    let cursor = state.view.cursor;
    let text = state.clipboard.text();
    state.view.cursor = if state.clipboard.is_linewise() {
        state.doc.insert_row(cursor.y + 1, text);
        Position::new(0, cursor.y + 1)
    } else {
        state.doc.insert_text(cursor, text)
    };
    tracing::debug!(target: "actions.dispatch", op = "paste", linewise = state.clipboard.is_linewise(), "clipboard");
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Settings;
    use core_text::{DEFAULT_TAB_WIDTH, Document};
    use pretty_assertions::assert_eq;

    fn state(text: &str) -> EditorState {
        EditorState::new(
            Document::from_bytes(text.as_bytes(), DEFAULT_TAB_WIDTH),
            Settings::default(),
        )
    }

    fn text(st: &EditorState) -> String {
        String::from_utf8(st.doc.rows_to_string()).unwrap()
    }

    #[test]
    fn copy_without_selection_reports() {
        let mut st = state("abc\n");
        copy(&mut st);
        assert!(st.clipboard.is_empty());
        assert!(st.status.as_ref().unwrap().text.starts_with("Nothing selected"));
    }

    #[test]
    fn copy_leaves_document_untouched() {
        let mut st = state("abc\ndef\n");
        st.view.cursor = Position::new(1, 0);
        toggle(&mut st);
        st.view.cursor = Position::new(2, 1);
        copy(&mut st);
        assert_eq!(st.clipboard.text(), b"bc\nde");
        assert_eq!(st.mode, Mode::Edit);
        assert!(!st.doc.is_dirty());
    }

    #[test]
    fn yank_then_paste_row_below() {
        let mut st = state("one\ntwo\n");
        yank_row(&mut st);
        assert!(st.clipboard.is_linewise());
        paste(&mut st);
        assert_eq!(text(&st), "one\none\ntwo\n");
        assert_eq!(st.view.cursor, Position::new(0, 1));
    }

    #[test]
    fn yanked_empty_row_still_pastes() {
        let mut st = state("\nx\n");
        yank_row(&mut st);
        paste(&mut st);
        assert_eq!(text(&st), "\n\nx\n");
    }

    #[test]
    fn characterwise_paste_splits_rows() {
        let mut st = state("[]\n");
        st.clipboard.set_chars(b"ab\ncd".to_vec());
        st.view.cursor = Position::new(1, 0);
        paste(&mut st);
        assert_eq!(text(&st), "[ab\ncd]\n");
        assert_eq!(st.view.cursor, Position::new(2, 1));
        // clipboard survives a paste
        assert_eq!(st.clipboard.text(), b"ab\ncd");
    }

    #[test]
    fn empty_clipboard_paste_is_reported() {
        let mut st = state("x\n");
        paste(&mut st);
        assert!(!st.doc.is_dirty());
        assert_eq!(st.status.as_ref().unwrap().text, "Clipboard is empty");
    }

    #[test]
    fn toggle_round_trip() {
        let mut st = state("x\n");
        toggle(&mut st);
        assert_eq!(st.mode, Mode::Select);
        assert_eq!(st.status.as_ref().unwrap().text, SELECTION_MESSAGE);
        toggle(&mut st);
        assert_eq!(st.mode, Mode::Edit);
        assert_eq!(st.anchor, None);
    }
}
