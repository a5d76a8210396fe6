//! Terminal input decoding: raw bytes to logical keys.
//!
//! The decoder pulls bytes from a [`ByteSource`]. The first byte of a key is
//! read without a deadline; bytes after an `ESC` are read with a short
//! per-byte timeout so a lone `Escape` press is not mistaken for the start of
//! a sequence. A timeout or an unknown sequence degrades to [`Key::Escape`];
//! the tail of an unknown CSI is read and discarded so it never shows up as
//! typed characters.

mod escape;

pub use escape::{EscapeParser, EscapeStep, MAX_SEQUENCE_LEN, is_csi_final};

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(100);

const ESC: u8 = 0x1b;

/// Upper bound on bytes discarded after an unrecognized CSI.
const MAX_CSI_TAIL: usize = 16;

/// A logical key produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable (or otherwise unclassified) byte.
    Char(u8),
    /// Control chord, carried as the lowercase letter (`Ctrl(b's')`), or the
    /// punctuation for bytes 28..=31.
    Ctrl(u8),
    Enter,
    Tab,
    Backspace,
    Escape,
    Null,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

/// Raw control byte for a letter: `ctrl(b'q') == 0x11`.
pub const fn ctrl(letter: u8) -> u8 {
    letter & 0x1f
}

/// Source of raw terminal bytes.
///
/// `timeout == None` blocks until a byte arrives. `Ok(None)` means the
/// timeout elapsed with nothing to read.
pub trait ByteSource {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        (**self).read_byte(timeout)
    }
}

/// Classify a single byte that is not the start of an escape sequence.
pub fn classify_byte(b: u8) -> Key {
    match b {
        0 => Key::Null,
        b'\t' => Key::Tab,
        b'\r' => Key::Enter,
        ESC => Key::Escape,
        127 => Key::Backspace,
        1..=26 => Key::Ctrl(b | 0x60),
        28..=31 => Key::Ctrl(b | 0x40),
        _ => Key::Char(b),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    escape_timeout: Duration,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_ESCAPE_TIMEOUT)
    }
}

impl Decoder {
    pub fn new(escape_timeout: Duration) -> Self {
        Self { escape_timeout }
    }

    pub fn escape_timeout(&self) -> Duration {
        self.escape_timeout
    }

    /// Read one logical key. Interrupted reads are retried; any other read
    /// error is returned to the caller.
    pub fn read_key<S: ByteSource + ?Sized>(&self, src: &mut S) -> io::Result<Key> {
        let first = loop {
            match src.read_byte(None) {
                Ok(Some(b)) => break b,
                Ok(None) => continue,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if first != ESC {
            return Ok(classify_byte(first));
        }
        self.read_escape(src)
    }

    fn read_escape<S: ByteSource + ?Sized>(&self, src: &mut S) -> io::Result<Key> {
        let mut parser = EscapeParser::new();
        loop {
            let b = match src.read_byte(Some(self.escape_timeout)) {
                Ok(Some(b)) => b,
                Ok(None) => {
                    tracing::trace!(
                        target: "input.decode",
                        consumed = parser.consumed(),
                        "escape_timeout"
                    );
                    return Ok(Key::Escape);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            match parser.feed(b) {
                EscapeStep::Pending => {}
                EscapeStep::Complete(key) => return Ok(key),
                EscapeStep::Unrecognized => {
                    let discarded = if parser.in_open_csi() {
                        self.discard_csi_tail(src)?
                    } else {
                        0
                    };
                    tracing::debug!(
                        target: "input.decode",
                        consumed = parser.consumed(),
                        discarded,
                        last = b,
                        "escape_unrecognized"
                    );
                    return Ok(Key::Escape);
                }
            }
        }
    }

    /// Read up to and including the CSI final byte. Stops early on a timeout
    /// or after `MAX_CSI_TAIL` bytes. Returns the number of bytes dropped.
    fn discard_csi_tail<S: ByteSource + ?Sized>(&self, src: &mut S) -> io::Result<usize> {
        let mut discarded = 0;
        while discarded < MAX_CSI_TAIL {
            match src.read_byte(Some(self.escape_timeout)) {
                Ok(Some(b)) => {
                    discarded += 1;
                    if is_csi_final(b) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(discarded)
    }
}

/// One scripted read result for [`ScriptedBytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Byte(u8),
    Timeout,
    Interrupted,
    Fail,
}

/// In-memory [`ByteSource`] replaying a fixed script. Used by tests across the
/// workspace in place of a real terminal. An exhausted script reports
/// `UnexpectedEof`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedBytes {
    steps: VecDeque<Step>,
}

impl ScriptedBytes {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().copied().map(Step::Byte))
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.steps.extend(bytes.iter().copied().map(Step::Byte));
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self, _timeout: Option<Duration>) -> io::Result<Option<u8>> {
        match self.steps.pop_front() {
            Some(Step::Byte(b)) => Ok(Some(b)),
            Some(Step::Timeout) => Ok(None),
            Some(Step::Interrupted) => Err(io::Error::from(io::ErrorKind::Interrupted)),
            Some(Step::Fail) => Err(io::Error::other("scripted failure")),
            None => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
        }
    }
}
