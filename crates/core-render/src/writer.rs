//! Per-frame output buffer.
//!
//! Every escape sequence and text byte of one frame is queued into a single
//! `Vec<u8>`; nothing reaches the terminal until the caller hands the finished
//! buffer to `TerminalIo::write_bytes`.
//!
//! Invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute (0,0) origin; caller ensures bounds.
//! * The writer owns no global state; it is a short-lived object per frame.

use crossterm::{
    Command,
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::fmt;

/// Raw SGR parameter (`ESC [ n m`), used for the configurable colour table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSgr(pub u8);

impl Command for SetSgr {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[{}m", self.0)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::other(
            "SGR colour codes require an ANSI capable terminal",
        ))
    }
}

/// Counters for one composed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub bytes: usize,
    pub colour_changes: u64,
    pub rows_drawn: usize,
}

#[derive(Default)]
pub struct FrameWriter {
    buf: Vec<u8>,
    colour_changes: u64,
}

impl FrameWriter {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            colour_changes: 0,
        }
    }

    // Writes into a Vec cannot fail; the `Result` from `queue!` is dropped.
    fn queue(&mut self, cmd: impl Command) {
        let _ = queue!(self.buf, cmd);
    }

    pub fn hide_cursor(&mut self) {
        self.queue(Hide);
    }
    pub fn show_cursor(&mut self) {
        self.queue(Show);
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.queue(MoveTo(x, y));
    }
    pub fn clear_to_eol(&mut self) {
        self.queue(Clear(ClearType::UntilNewLine));
    }
    pub fn reverse(&mut self) {
        self.queue(SetAttribute(Attribute::Reverse));
    }
    pub fn no_reverse(&mut self) {
        self.queue(SetAttribute(Attribute::NoReverse));
    }
    pub fn reset(&mut self) {
        self.queue(SetAttribute(Attribute::Reset));
    }
    /// Foreground colour change; counted in `colour_changes`.
    pub fn sgr(&mut self, code: u8) {
        self.queue(SetSgr(code));
        self.colour_changes += 1;
    }
    /// Background colour for the text area (not counted).
    pub fn background(&mut self, code: u8) {
        self.queue(SetSgr(code));
    }
    pub fn bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }
    pub fn byte(&mut self, b: u8) {
        self.buf.push(b);
    }
    pub fn text(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }
    pub fn newline(&mut self) {
        self.buf.extend_from_slice(b"\r\n");
    }

    pub fn colour_changes(&self) -> u64 {
        self.colour_changes
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_expected_sequences() {
        let mut w = FrameWriter::default();
        w.hide_cursor();
        w.move_to(0, 0);
        w.sgr(31);
        w.text("x");
        w.clear_to_eol();
        w.move_to(4, 2);
        w.show_cursor();
        assert_eq!(w.colour_changes(), 1);
        assert_eq!(
            w.finish(),
            b"\x1b[?25l\x1b[1;1H\x1b[31mx\x1b[K\x1b[3;5H\x1b[?25h".to_vec()
        );
    }

    #[test]
    fn reverse_video_attributes() {
        let mut w = FrameWriter::default();
        w.reverse();
        w.byte(b'@');
        w.no_reverse();
        w.reset();
        assert_eq!(w.finish(), b"\x1b[7m@\x1b[27m\x1b[0m".to_vec());
    }
}
