//! Escape-sequence state machine.
//!
//! Fed one byte at a time after an `ESC` has been read. Recognized forms:
//! * `ESC [ A|B|C|D|H|F` (arrows, Home, End)
//! * `ESC [ <digit> ~` (Home 1/7, Delete 3, End 4/8, PageUp 5, PageDown 6)
//! * `ESC O H|F` (Home, End)
//!
//! Sequences are at most `MAX_SEQUENCE_LEN` bytes after the `ESC`; anything
//! longer or unknown is `Unrecognized` and the caller degrades to `Escape`.
//! An unrecognized CSI that has not yet seen its final byte (`ESC [ 1 ; 5 C`,
//! `ESC [ 1 5 ~`) is reported through [`EscapeParser::in_open_csi`] so the
//! caller can discard the rest of it.

use crate::Key;

/// Bytes following `ESC` in the longest recognized sequence.
pub const MAX_SEQUENCE_LEN: usize = 3;

/// CSI final bytes end a control sequence.
pub fn is_csi_final(b: u8) -> bool {
    (0x40..=0x7e).contains(&b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeStep {
    /// More bytes are needed.
    Pending,
    Complete(Key),
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Csi,
    CsiParam(u8),
    Ss3,
    Done,
}

#[derive(Debug, Clone)]
pub struct EscapeParser {
    state: State,
    consumed: usize,
    csi: bool,
    last: u8,
}

impl Default for EscapeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EscapeParser {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            consumed: 0,
            csi: false,
            last: 0,
        }
    }

    /// Bytes consumed so far (excluding the leading `ESC`).
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// True once a CSI (`ESC [`) was started but its final byte has not been
    /// fed yet.
    pub fn in_open_csi(&self) -> bool {
        self.csi && !is_csi_final(self.last)
    }

    pub fn feed(&mut self, b: u8) -> EscapeStep {
        self.consumed += 1;
        self.last = b;
        if self.consumed > MAX_SEQUENCE_LEN {
            return self.reject();
        }
        let step = match (self.state, b) {
            (State::Start, b'[') => {
                self.state = State::Csi;
                self.csi = true;
                EscapeStep::Pending
            }
            (State::Start, b'O') => {
                self.state = State::Ss3;
                EscapeStep::Pending
            }
            (State::Csi, d @ b'0'..=b'9') => {
                self.state = State::CsiParam(d);
                EscapeStep::Pending
            }
            (State::Csi, b'A') => EscapeStep::Complete(Key::ArrowUp),
            (State::Csi, b'B') => EscapeStep::Complete(Key::ArrowDown),
            (State::Csi, b'C') => EscapeStep::Complete(Key::ArrowRight),
            (State::Csi, b'D') => EscapeStep::Complete(Key::ArrowLeft),
            (State::Csi, b'H') | (State::Ss3, b'H') => EscapeStep::Complete(Key::Home),
            (State::Csi, b'F') | (State::Ss3, b'F') => EscapeStep::Complete(Key::End),
            (State::CsiParam(d), b'~') => match d {
                b'1' | b'7' => EscapeStep::Complete(Key::Home),
                b'3' => EscapeStep::Complete(Key::Delete),
                b'4' | b'8' => EscapeStep::Complete(Key::End),
                b'5' => EscapeStep::Complete(Key::PageUp),
                b'6' => EscapeStep::Complete(Key::PageDown),
                _ => EscapeStep::Unrecognized,
            },
            _ => EscapeStep::Unrecognized,
        };
        if !matches!(step, EscapeStep::Pending) {
            self.state = State::Done;
        }
        step
    }

    fn reject(&mut self) -> EscapeStep {
        self.state = State::Done;
        EscapeStep::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bytes: &[u8]) -> EscapeStep {
        let mut p = EscapeParser::new();
        let mut last = EscapeStep::Pending;
        for b in bytes {
            last = p.feed(*b);
            if last != EscapeStep::Pending {
                break;
            }
        }
        last
    }

    #[test]
    fn arrows_and_home_end() {
        assert_eq!(run(b"[A"), EscapeStep::Complete(Key::ArrowUp));
        assert_eq!(run(b"[B"), EscapeStep::Complete(Key::ArrowDown));
        assert_eq!(run(b"[C"), EscapeStep::Complete(Key::ArrowRight));
        assert_eq!(run(b"[D"), EscapeStep::Complete(Key::ArrowLeft));
        assert_eq!(run(b"[H"), EscapeStep::Complete(Key::Home));
        assert_eq!(run(b"OF"), EscapeStep::Complete(Key::End));
    }

    #[test]
    fn tilde_forms() {
        assert_eq!(run(b"[1~"), EscapeStep::Complete(Key::Home));
        assert_eq!(run(b"[3~"), EscapeStep::Complete(Key::Delete));
        assert_eq!(run(b"[4~"), EscapeStep::Complete(Key::End));
        assert_eq!(run(b"[5~"), EscapeStep::Complete(Key::PageUp));
        assert_eq!(run(b"[6~"), EscapeStep::Complete(Key::PageDown));
        assert_eq!(run(b"[7~"), EscapeStep::Complete(Key::Home));
        assert_eq!(run(b"[8~"), EscapeStep::Complete(Key::End));
    }

    #[test]
    fn unknown_sequences_are_rejected() {
        assert_eq!(run(b"[2~"), EscapeStep::Unrecognized);
        assert_eq!(run(b"[5x"), EscapeStep::Unrecognized);
        assert_eq!(run(b"x"), EscapeStep::Unrecognized);
        assert_eq!(run(b"OA"), EscapeStep::Unrecognized);
    }

    #[test]
    fn open_csi_is_reported_until_final_byte() {
        let mut p = EscapeParser::new();
        p.feed(b'[');
        p.feed(b'1');
        assert_eq!(p.feed(b';'), EscapeStep::Unrecognized);
        assert!(p.in_open_csi());

        let mut p = EscapeParser::new();
        p.feed(b'[');
        p.feed(b'1');
        assert_eq!(p.feed(b'5'), EscapeStep::Unrecognized);
        assert!(p.in_open_csi());

        // the final byte was already consumed
        let mut p = EscapeParser::new();
        p.feed(b'[');
        p.feed(b'2');
        assert_eq!(p.feed(b'~'), EscapeStep::Unrecognized);
        assert!(!p.in_open_csi());

        // not a CSI at all
        let mut p = EscapeParser::new();
        assert_eq!(p.feed(b'1'), EscapeStep::Unrecognized);
        assert!(!p.in_open_csi());
    }

    #[test]
    fn pending_until_terminator() {
        let mut p = EscapeParser::new();
        assert_eq!(p.feed(b'['), EscapeStep::Pending);
        assert_eq!(p.feed(b'6'), EscapeStep::Pending);
        assert_eq!(p.consumed(), 2);
        assert_eq!(p.feed(b'~'), EscapeStep::Complete(Key::PageDown));
    }

    #[test]
    fn feeding_after_completion_is_rejected() {
        let mut p = EscapeParser::new();
        assert_eq!(p.feed(b'['), EscapeStep::Pending);
        assert_eq!(p.feed(b'A'), EscapeStep::Complete(Key::ArrowUp));
        assert_eq!(p.feed(b'A'), EscapeStep::Unrecognized);
    }
}
