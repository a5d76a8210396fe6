//! Key -> Action translation. Stateless: the prompt flows see raw keys
//! through `dispatcher::prompt`, never through this table.

use crate::{Action, EditKind, MotionKind};
use core_input::Key;

pub fn translate_key(key: Key) -> Option<Action> {
    let action = match key {
        Key::Char(b) => Action::Edit(EditKind::InsertByte(b)),
        Key::Tab => Action::Edit(EditKind::InsertTab),
        Key::Enter => Action::Edit(EditKind::InsertNewline),
        Key::Backspace | Key::Ctrl(b'h') => Action::Edit(EditKind::Backspace),
        Key::Delete => Action::Edit(EditKind::DeleteForward),
        Key::ArrowLeft => Action::Motion(MotionKind::Left),
        Key::ArrowRight => Action::Motion(MotionKind::Right),
        Key::ArrowUp => Action::Motion(MotionKind::Up),
        Key::ArrowDown => Action::Motion(MotionKind::Down),
        Key::Home => Action::Motion(MotionKind::LineStart),
        Key::End => Action::Motion(MotionKind::LineEnd),
        Key::PageUp => Action::Motion(MotionKind::PageUp),
        Key::PageDown => Action::Motion(MotionKind::PageDown),
        Key::Escape => Action::Escape,
        Key::Ctrl(b's') => Action::Save,
        Key::Ctrl(b'q') => Action::Quit,
        Key::Ctrl(b'f') => Action::Find,
        Key::Ctrl(b'r') => Action::Replace,
        Key::Ctrl(b'g') => Action::Goto,
        Key::Ctrl(b'd') => Action::ToggleSelection,
        Key::Ctrl(b'a') => Action::SelectAll,
        Key::Ctrl(b'c') => Action::Copy,
        Key::Ctrl(b'y') => Action::YankRow,
        // Ctrl-P is the row-paste binding; both paste whatever the clipboard holds.
        Key::Ctrl(b'v') | Key::Ctrl(b'p') => Action::Paste,
        Key::Ctrl(b'l') => Action::Redraw,
        Key::Ctrl(_) | Key::Null => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_and_control_keys() {
        assert_eq!(
            translate_key(Key::Char(b'x')),
            Some(Action::Edit(EditKind::InsertByte(b'x')))
        );
        assert_eq!(translate_key(Key::Ctrl(b's')), Some(Action::Save));
        assert_eq!(translate_key(Key::Ctrl(b'q')), Some(Action::Quit));
        assert_eq!(translate_key(Key::Ctrl(b'd')), Some(Action::ToggleSelection));
        assert_eq!(translate_key(Key::Ctrl(b'p')), Some(Action::Paste));
        assert_eq!(translate_key(Key::Ctrl(b'v')), Some(Action::Paste));
    }

    #[test]
    fn backspace_aliases() {
        let bs = Some(Action::Edit(EditKind::Backspace));
        assert_eq!(translate_key(Key::Backspace), bs);
        assert_eq!(translate_key(Key::Ctrl(b'h')), bs);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(translate_key(Key::Null), None);
        assert_eq!(translate_key(Key::Ctrl(b'z')), None);
        assert_eq!(translate_key(Key::Ctrl(b'\\')), None);
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(
            translate_key(Key::Home),
            Some(Action::Motion(MotionKind::LineStart))
        );
        assert_eq!(
            translate_key(Key::PageDown),
            Some(Action::Motion(MotionKind::PageDown))
        );
        assert_eq!(
            translate_key(Key::Delete),
            Some(Action::Edit(EditKind::DeleteForward))
        );
    }
}
