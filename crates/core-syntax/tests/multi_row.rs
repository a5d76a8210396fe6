use core_syntax::{Highlight, by_name, classify, select_for_name};
use pretty_assertions::assert_eq;

/// Classify consecutive rows the way the row store does, carrying the
/// open-comment flag from each row into the next.
fn classify_rows(rows: &[&str], profile: &str) -> Vec<(Vec<Highlight>, bool)> {
    let syntax = by_name(profile);
    let mut open = false;
    rows.iter()
        .map(|row| {
            let (tags, now_open) = classify(row.as_bytes(), open, syntax);
            open = now_open;
            (tags, now_open)
        })
        .collect()
}

#[test]
fn block_comment_spans_three_rows() {
    let out = classify_rows(&["int a; /* start", "still inside", "end */ int b;"], "c");
    assert!(out[0].1);
    assert!(out[1].1);
    assert!(!out[2].1);
    assert_eq!(&out[0].0[..3], &[Highlight::KeywordType; 3]);
    assert!(out[0].0[7..].iter().all(|t| *t == Highlight::BlockComment));
    assert!(out[1].0.iter().all(|t| *t == Highlight::BlockComment));
    assert!(out[2].0[..6].iter().all(|t| *t == Highlight::BlockComment));
    assert_eq!(&out[2].0[7..10], &[Highlight::KeywordType; 3]);
}

#[test]
fn rust_profile_keywords_and_numbers() {
    let syntax = select_for_name("src/main.rs");
    let (tags, open) = classify(b"let x = 42; // done", false, syntax);
    assert!(!open);
    assert_eq!(&tags[..3], &[Highlight::KeywordType; 3]);
    assert_eq!(tags[4], Highlight::Normal);
    assert_eq!(&tags[8..10], &[Highlight::Number; 2]);
    assert!(tags[12..].iter().all(|t| *t == Highlight::Comment));
}

#[test]
fn python_hash_comments_do_not_carry() {
    let out = classify_rows(&["x = 1  # note", "return x"], "python");
    assert_eq!(out[0].0[4], Highlight::Number);
    assert!(out[0].0[7..].iter().all(|t| *t == Highlight::Comment));
    assert!(!out[0].1);
    assert_eq!(&out[1].0[..6], &[Highlight::KeywordReturn; 6]);
}

#[test]
fn unknown_file_names_are_plain_text() {
    let syntax = select_for_name("README");
    assert!(syntax.is_none());
    let (tags, open) = classify(b"int /* 42", true, syntax);
    assert!(!open);
    assert!(tags.iter().all(|t| *t == Highlight::Normal));
}
