//! Syntax classifier: per-byte highlight tags for one rendered row.
//!
//! The classifier is a single left-to-right scan over the rendered (tab
//! expanded) bytes of a row. State carried through the scan:
//! * the open string delimiter (if any),
//! * whether a block comment is open (seeded from the previous row),
//! * whether the previous byte was a separator.
//!
//! A line comment ends the scan (the rest of the row is tagged `Comment`).
//! The only state crossing row boundaries is the returned "ends inside block
//! comment" flag; re-running following rows when it changes is the row
//! store's job (see `core_text::Document`).
//!
//! Invariants:
//! * the produced tag vector has exactly one entry per input byte;
//! * with no profile every tag is `Normal` and the returned flag is `false`;
//! * keywords only match between separators (or row start / row end), so
//!   `returnValue` never yields a `return` keyword.

mod profiles;

pub use profiles::{KeywordGroup, SYNTAXES, Syntax, SyntaxFlags, by_name, select_for_name};

/// Highlight class of one rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    KeywordCond,
    KeywordType,
    KeywordPreprocessor,
    KeywordReturn,
    KeywordAdapter,
    KeywordLoop,
    String,
    Number,
    /// Search match / selection overlay. Never produced by `classify`.
    Match,
}

impl Highlight {
    pub const ALL: [Highlight; 12] = [
        Highlight::Normal,
        Highlight::Comment,
        Highlight::BlockComment,
        Highlight::KeywordCond,
        Highlight::KeywordType,
        Highlight::KeywordPreprocessor,
        Highlight::KeywordReturn,
        Highlight::KeywordAdapter,
        Highlight::KeywordLoop,
        Highlight::String,
        Highlight::Number,
        Highlight::Match,
    ];
}

/// Whitespace, NUL, or one of the punctuation bytes that delimit words.
pub fn is_separator(c: u8) -> bool {
    c == 0 || c.is_ascii_whitespace() || b",.()+-/*=~%<>[];{}:&|!^".contains(&c)
}

/// `rest` starts with `'` and the literal closes within three bytes.
fn closes_char_literal(rest: &[u8]) -> bool {
    matches!(rest, [b'\'', b'\\', _, b'\'', ..])
        || matches!(rest, [b'\'', c, b'\'', ..] if *c != b'\\')
}

struct ScanState {
    prev_separator: bool,
    string_delim: Option<u8>,
    in_block_comment: bool,
}

/// Classify `text` into a fresh tag vector. See [`classify_into`].
pub fn classify(
    text: &[u8],
    prev_open_comment: bool,
    syntax: Option<&Syntax>,
) -> (Vec<Highlight>, bool) {
    let mut tags = Vec::with_capacity(text.len());
    let open = classify_into(&mut tags, text, prev_open_comment, syntax);
    (tags, open)
}

/// Classify `text` into `tags` (cleared and resized to `text.len()`), returning
/// whether the row ends inside an unterminated block comment.
pub fn classify_into(
    tags: &mut Vec<Highlight>,
    text: &[u8],
    prev_open_comment: bool,
    syntax: Option<&Syntax>,
) -> bool {
    tags.clear();
    tags.resize(text.len(), Highlight::Normal);
    let Some(syntax) = syntax else {
        return false;
    };

    let line_comment = syntax
        .line_comment
        .map(str::as_bytes)
        .filter(|s| !s.is_empty());
    let block_comment = syntax
        .block_comment
        .map(|(s, e)| (s.as_bytes(), e.as_bytes()))
        .filter(|(s, e)| !s.is_empty() && !e.is_empty());

    let mut scan = ScanState {
        prev_separator: true,
        string_delim: None,
        in_block_comment: block_comment.is_some() && prev_open_comment,
    };

    let mut i = 0;
    'scan: while i < text.len() {
        let c = text[i];
        let prev_tag = if i > 0 { tags[i - 1] } else { Highlight::Normal };

        if let Some(lc) = line_comment
            && scan.string_delim.is_none()
            && !scan.in_block_comment
            && text[i..].starts_with(lc)
        {
            tags[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = block_comment
            && scan.string_delim.is_none()
        {
            if scan.in_block_comment {
                if text[i..].starts_with(end) {
                    tags[i..i + end.len()].fill(Highlight::BlockComment);
                    i += end.len();
                    scan.in_block_comment = false;
                    scan.prev_separator = true;
                } else {
                    tags[i] = Highlight::BlockComment;
                    i += 1;
                }
                continue;
            } else if text[i..].starts_with(start) {
                tags[i..i + start.len()].fill(Highlight::BlockComment);
                i += start.len();
                scan.in_block_comment = true;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(delim) = scan.string_delim {
                tags[i] = Highlight::String;
                if c == b'\\' && i + 1 < text.len() {
                    tags[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == delim {
                    scan.string_delim = None;
                }
                i += 1;
                scan.prev_separator = true;
                continue;
            } else if c == b'"'
                || (c == b'\''
                    && (!syntax.flags.contains(SyntaxFlags::CHAR_LITERALS)
                        || closes_char_literal(&text[i..])))
            {
                scan.string_delim = Some(c);
                tags[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::NUMBERS)
            && ((c.is_ascii_digit() && (scan.prev_separator || prev_tag == Highlight::Number))
                || (c == b'.' && prev_tag == Highlight::Number))
        {
            tags[i] = Highlight::Number;
            i += 1;
            scan.prev_separator = false;
            continue;
        }

        if scan.prev_separator {
            for group in syntax.keywords {
                for word in group.words {
                    let w = word.as_bytes();
                    let after = i + w.len();
                    if text[i..].starts_with(w) && (after == text.len() || is_separator(text[after]))
                    {
                        tags[i..after].fill(group.class);
                        i = after;
                        scan.prev_separator = false;
                        continue 'scan;
                    }
                }
            }
        }

        scan.prev_separator = is_separator(c);
        i += 1;
    }

    scan.in_block_comment
}
