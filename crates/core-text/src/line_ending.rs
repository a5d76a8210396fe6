//! Line terminator detection and splitting.
//!
//! Loading splits the input on `\n`; a `\r` directly before it makes the
//! terminator CRLF. A lone `\r` anywhere else is line content. Each line keeps
//! the terminator it was read with (None for an unterminated last line), so
//! unedited text serializes back byte-for-byte even when styles are mixed.
//! The majority style becomes the default for rows created by edits.

/// Line ending style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Crlf => b"\r\n",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Lf => "LF",
            LineEnding::Crlf => "CRLF",
        }
    }
}

/// One source line without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: Vec<u8>,
    pub ending: Option<LineEnding>,
}

/// Result of splitting raw file bytes into lines.
#[derive(Debug)]
pub struct SplitText {
    pub lines: Vec<SourceLine>,
    /// Majority style (ties resolved CRLF > LF).
    pub ending: LineEnding,
    /// More than one style was present.
    pub mixed: bool,
}

impl SplitText {
    pub fn had_trailing_newline(&self) -> bool {
        self.lines.last().is_some_and(|l| l.ending.is_some())
    }
}

/// Split `input` into lines, stripping terminators.
pub fn split_lines(input: &[u8]) -> SplitText {
    let mut lines = Vec::new();
    let (mut crlf, mut lf) = (0usize, 0usize);
    let mut rest = input;
    while let Some(nl) = rest.iter().position(|b| *b == b'\n') {
        let (text, ending) = match rest[..nl].strip_suffix(b"\r") {
            Some(text) => {
                crlf += 1;
                (text, LineEnding::Crlf)
            }
            None => {
                lf += 1;
                (&rest[..nl], LineEnding::Lf)
            }
        };
        lines.push(SourceLine {
            text: text.to_vec(),
            ending: Some(ending),
        });
        rest = &rest[nl + 1..];
    }
    if !rest.is_empty() {
        lines.push(SourceLine {
            text: rest.to_vec(),
            ending: None,
        });
    }

    let ending = if crlf >= lf && crlf > 0 {
        LineEnding::Crlf
    } else {
        LineEnding::Lf
    };
    SplitText {
        lines,
        ending,
        mixed: crlf > 0 && lf > 0,
    }
}
