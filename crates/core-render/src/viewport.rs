//! Scroll model: keep the cursor inside the visible window.
//!
//! `row_offset` is the first document row on screen and `column_offset` the
//! first rendered column. After [`scroll`] the cursor row lies in
//! `[row_offset, row_offset + text_rows)` and its rendered column in
//! `[column_offset, column_offset + text_cols)`. Offsets move by the minimum
//! amount needed.

use core_state::EditorState;

/// Offsets that bring `(cursor_y, cursor_rx)` into a `rows x cols` window.
pub fn compute_offsets(
    row_offset: usize,
    column_offset: usize,
    cursor_y: usize,
    cursor_rx: usize,
    rows: usize,
    cols: usize,
) -> (usize, usize) {
    let fit = |offset: usize, pos: usize, extent: usize| {
        if extent == 0 {
            return offset;
        }
        if pos < offset {
            pos
        } else if pos >= offset + extent {
            pos + 1 - extent
        } else {
            offset
        }
    };
    (
        fit(row_offset, cursor_y, rows),
        fit(column_offset, cursor_rx, cols),
    )
}

/// Recompute the view offsets of `state`. Returns true if either changed.
pub fn scroll(state: &mut EditorState) -> bool {
    state.clamp_cursor();
    let (row_offset, column_offset) = compute_offsets(
        state.view.row_offset,
        state.view.column_offset,
        state.view.cursor.y,
        state.cursor_rx(),
        state.text_rows(),
        state.text_cols(),
    );
    let changed = row_offset != state.view.row_offset || column_offset != state.view.column_offset;
    if changed {
        tracing::trace!(target: "render.frame", row_offset, column_offset, "scroll");
        state.view.row_offset = row_offset;
        state.view.column_offset = column_offset;
    }
    changed
}
