//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion`    - cursor movement (extends the selection in select mode)
//! * `edit`      - text mutation (insert/delete/backspace/newline/tab)
//! * `selection` - select mode, copy, row yank and paste
//! * `prompt`    - search, replace and goto input flows
//!
//! Save and quit are small enough to live here.

use crate::io_ops::{self, SaveError};
use crate::{Action, key_translator::translate_key};
use core_input::Key;
use core_state::{EditorState, Mode, PromptKind};

mod edit;
mod motion;
mod prompt;
mod selection;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Entry point for one decoded key.
///
/// The search highlight lives for a single frame, so it is dropped before
/// anything else happens. An open prompt consumes the key; otherwise the key
/// is translated and dispatched.
pub fn handle_key(state: &mut EditorState, key: Key) -> DispatchResult {
    let had_match = state.search_match.take().is_some();
    let mut result = if state.prompt.is_some() {
        prompt::handle_prompt_key(state, key)
    } else {
        match translate_key(key) {
            Some(action) => dispatch(action, state),
            None => DispatchResult::clean(),
        }
    };
    result.dirty |= had_match;
    result
}

/// Apply an action to editor state. Returns `DispatchResult` describing whether
/// a render is needed (`dirty`) or the editor should exit (`quit`).
pub fn dispatch(action: Action, state: &mut EditorState) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", ?action, mode = ?state.mode, "dispatch");
    if action != Action::Quit {
        state.reset_quit_counter();
    }
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Save => handle_save(state),
        Action::Quit => handle_quit(state),
        Action::Find => prompt::begin(state, PromptKind::Search),
        Action::Replace => prompt::begin(state, PromptKind::ReplaceQuery),
        Action::Goto => prompt::begin(state, PromptKind::Goto),
        Action::ToggleSelection => selection::toggle(state),
        Action::SelectAll => selection::select_all(state),
        Action::Copy => selection::copy(state),
        Action::YankRow => selection::yank_row(state),
        Action::Paste => selection::paste(state),
        Action::Redraw => DispatchResult::dirty(),
        Action::Escape => {
            if state.mode == Mode::Select {
                state.exit_selection();
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
    }
}

fn handle_save(state: &mut EditorState) -> DispatchResult {
    match io_ops::save_document(&mut state.doc) {
        Ok(bytes) => state.set_status(format!("{bytes} bytes written to disk")),
        Err(SaveError::NoFilename) => {
            state.set_status("No file name: start bric with a path to save")
        }
        Err(e) => state.set_status(format!("Can't save! {e}")),
    }
    DispatchResult::dirty()
}

/// Unsaved changes need `quit_times` extra presses; a clean document quits at once.
fn handle_quit(state: &mut EditorState) -> DispatchResult {
    if state.doc.is_dirty() && state.quit_remaining > 0 {
        let n = state.quit_remaining;
        state.set_status(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {n} more times to quit."
        ));
        state.quit_remaining -= 1;
        return DispatchResult::dirty();
    }
    tracing::info!(target: "actions.dispatch", dirty = state.doc.is_dirty(), "quit");
    DispatchResult::quit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditKind, MotionKind};
    use core_state::{SearchMatch, Settings};
    use core_text::{DEFAULT_TAB_WIDTH, Document};

    fn state(text: &str) -> EditorState {
        EditorState::new(
            Document::from_bytes(text.as_bytes(), DEFAULT_TAB_WIDTH),
            Settings::default(),
        )
    }

    #[test]
    fn quit_on_clean_document_is_immediate() {
        let mut st = state("a\n");
        assert!(handle_key(&mut st, Key::Ctrl(b'q')).quit);
    }

    #[test]
    fn quit_on_dirty_document_needs_confirmation() {
        let mut st = state("a\n");
        dispatch(Action::Edit(EditKind::InsertByte(b'x')), &mut st);
        for remaining in (1..=3).rev() {
            let r = dispatch(Action::Quit, &mut st);
            assert!(!r.quit);
            let msg = &st.status.as_ref().unwrap().text;
            assert!(msg.contains(&format!("Press Ctrl-Q {remaining} more times")));
        }
        assert!(dispatch(Action::Quit, &mut st).quit);
    }

    #[test]
    fn other_keys_reset_the_quit_counter() {
        let mut st = state("a\n");
        dispatch(Action::Edit(EditKind::InsertByte(b'x')), &mut st);
        dispatch(Action::Quit, &mut st);
        dispatch(Action::Quit, &mut st);
        assert_eq!(st.quit_remaining, 1);
        dispatch(Action::Motion(MotionKind::Left), &mut st);
        assert_eq!(st.quit_remaining, 3);
    }

    #[test]
    fn save_without_file_name_is_rejected() {
        let mut st = state("a\n");
        dispatch(Action::Edit(EditKind::InsertByte(b'x')), &mut st);
        dispatch(Action::Save, &mut st);
        assert!(st.doc.is_dirty());
        assert!(st.status.as_ref().unwrap().text.starts_with("No file name"));
    }

    #[test]
    fn search_match_lasts_one_key() {
        let mut st = state("abc\n");
        st.search_match = Some(SearchMatch { y: 0, x: 0, len: 1 });
        let r = handle_key(&mut st, Key::Null);
        assert!(r.dirty);
        assert_eq!(st.search_match, None);
    }

    #[test]
    fn escape_leaves_selection_mode() {
        let mut st = state("abc\n");
        dispatch(Action::ToggleSelection, &mut st);
        assert_eq!(st.mode, Mode::Select);
        assert!(dispatch(Action::Escape, &mut st).dirty);
        assert_eq!(st.mode, Mode::Edit);
        assert!(!dispatch(Action::Escape, &mut st).dirty);
    }
}
