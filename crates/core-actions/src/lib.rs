//! Editor controller: logical keys in, state mutations out.
//!
//! [`translate_key`] maps a decoded [`Key`](core_input::Key) to an [`Action`];
//! [`dispatch`] applies one action to the [`EditorState`](core_state::EditorState).
//! While a prompt (search, replace, goto) is open, [`handle_key`] routes keys
//! to the prompt instead of the translator.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch, handle_key};
pub use io_ops::{LoadError, SaveError, open_file, save_document};
pub use key_translator::translate_key;

/// Cursor motions. In selection mode each one extends the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

/// Text mutations at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertByte(u8),
    /// One indent unit (a tab or `tab_width` spaces).
    InsertTab,
    InsertNewline,
    Backspace,
    DeleteForward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    Save,
    Quit,
    Find,
    Replace,
    Goto,
    ToggleSelection,
    SelectAll,
    Copy,
    YankRow,
    Paste,
    Redraw,
    Escape,
}
