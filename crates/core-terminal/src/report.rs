//! Cursor position reports and window size detection.

use crate::TerminalIo;
use anyhow::{Result, anyhow, bail};
use std::io;
use std::time::Duration;

const REPORT_TIMEOUT: Duration = Duration::from_millis(500);
const MAX_REPORT_LEN: usize = 32;

/// Parse `ESC [ rows ; cols R` into 1-based `(rows, cols)`.
pub fn parse_cursor_report(buf: &[u8]) -> Option<(u16, u16)> {
    let body = buf.strip_prefix(b"\x1b[")?.strip_suffix(b"R")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Ask the terminal where the cursor is (`ESC [ 6 n`) and read the reply.
pub fn query_cursor_position<T: TerminalIo + ?Sized>(term: &mut T) -> Result<(u16, u16)> {
    term.write_bytes(b"\x1b[6n")?;
    let mut reply = Vec::with_capacity(MAX_REPORT_LEN);
    while reply.len() < MAX_REPORT_LEN {
        match term.read_byte(Some(REPORT_TIMEOUT)) {
            Ok(Some(b)) => {
                reply.push(b);
                if b == b'R' {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    parse_cursor_report(&reply).ok_or_else(|| {
        anyhow!(
            "malformed cursor position report: {:?}",
            String::from_utf8_lossy(&reply)
        )
    })
}

/// Window size as `(rows, cols)`. Uses the OS query and falls back to pushing
/// the cursor to the bottom-right corner and reading its position.
pub fn get_window_size<T: TerminalIo + ?Sized>(term: &mut T) -> Result<(u16, u16)> {
    size_or_query(crossterm::terminal::size(), term)
}

pub(crate) fn size_or_query<T: TerminalIo + ?Sized>(
    reported: io::Result<(u16, u16)>,
    term: &mut T,
) -> Result<(u16, u16)> {
    match reported {
        Ok((cols, rows)) if cols > 0 && rows > 0 => return Ok((rows, cols)),
        Ok(_) => tracing::debug!(target: "runtime", "window_size_zero_query"),
        Err(e) => tracing::debug!(target: "runtime", error = %e, "window_size_query"),
    }
    term.write_bytes(b"\x1b[999C\x1b[999B")?;
    let (rows, cols) = query_cursor_position(term)?;
    if rows == 0 || cols == 0 {
        bail!("terminal reported an empty window");
    }
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_input::{ByteSource, ScriptedBytes, Step};

    struct FakeTerminal {
        input: ScriptedBytes,
        written: Vec<u8>,
    }

    impl FakeTerminal {
        fn new(input: ScriptedBytes) -> Self {
            Self {
                input,
                written: Vec::new(),
            }
        }
    }

    impl ByteSource for FakeTerminal {
        fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
            self.input.read_byte(timeout)
        }
    }

    impl TerminalIo for FakeTerminal {
        fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
            self.written.extend_from_slice(buf);
            Ok(())
        }
    }

    #[test]
    fn parses_reports() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80R"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"\x1b[1;1R"), Some((1, 1)));
        assert_eq!(parse_cursor_report(b"\x1b[24;80"), None);
        assert_eq!(parse_cursor_report(b"[24;80R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[x;80R"), None);
    }

    #[test]
    fn query_writes_request_and_reads_reply() {
        let mut term = FakeTerminal::new(ScriptedBytes::from_bytes(b"\x1b[12;40R"));
        assert_eq!(query_cursor_position(&mut term).unwrap(), (12, 40));
        assert_eq!(term.written, b"\x1b[6n");
    }

    #[test]
    fn query_times_out_with_error() {
        let mut term = FakeTerminal::new(ScriptedBytes::new([
            Step::Byte(0x1b),
            Step::Byte(b'['),
            Step::Timeout,
        ]));
        assert!(query_cursor_position(&mut term).is_err());
    }

    #[test]
    fn reported_size_wins() {
        let mut term = FakeTerminal::new(ScriptedBytes::default());
        assert_eq!(size_or_query(Ok((80, 24)), &mut term).unwrap(), (24, 80));
        assert!(term.written.is_empty());
    }

    #[test]
    fn falls_back_to_cursor_query() {
        let mut term = FakeTerminal::new(ScriptedBytes::from_bytes(b"\x1b[50;132R"));
        let size = size_or_query(Err(io::Error::other("no tty")), &mut term).unwrap();
        assert_eq!(size, (50, 132));
        assert_eq!(term.written, b"\x1b[999C\x1b[999B\x1b[6n");

        let mut term = FakeTerminal::new(ScriptedBytes::from_bytes(b"\x1b[30;90R"));
        assert_eq!(size_or_query(Ok((0, 0)), &mut term).unwrap(), (30, 90));
    }
}
