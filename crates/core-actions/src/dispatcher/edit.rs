//! Text edit action handling (insert/backspace/delete/newline/tab).
//!
//! All mutation goes through `core_text::Document`, which re-renders and
//! re-highlights the touched rows. Edits are ignored in selection mode.

use super::DispatchResult;
use crate::EditKind;
use core_state::{EditorState, Mode};
use core_text::Position;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    if state.mode == Mode::Select {
        return DispatchResult::clean();
    }
    state.clamp_cursor();
    let Position { x, y } = state.view.cursor;
    let doc = &mut state.doc;
    let cursor = match kind {
        EditKind::InsertByte(b) => {
            doc.row_insert_char(y, x, b);
            Position::new(x + 1, y)
        }
        EditKind::InsertTab => {
            let unit = state.settings.indent_unit();
            doc.insert_text(Position::new(x, y), &unit)
        }
        EditKind::InsertNewline => {
            doc.split_row(y, x);
            Position::new(0, y + 1)
        }
        EditKind::Backspace => {
            if x > 0 {
                doc.row_delete_char(y, x - 1);
                Position::new(x - 1, y)
            } else {
                match doc.merge_into_previous(y) {
                    Some(join) => Position::new(join, y - 1),
                    None => return DispatchResult::clean(),
                }
            }
        }
        EditKind::DeleteForward => {
            if x < doc.row_len(y) {
                doc.row_delete_char(y, x);
            } else if doc.merge_into_previous(y + 1).is_none() {
                return DispatchResult::clean();
            }
            Position::new(x, y)
        }
    };
    state.view.cursor = cursor;
    tracing::trace!(target: "actions.dispatch", op = ?kind, x, y, to_x = cursor.x, to_y = cursor.y, "edit");
    DispatchResult::dirty()
}
