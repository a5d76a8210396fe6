//! Built-in syntax profiles and file-name based selection.
//!
//! A profile is pure static data: file-name patterns, keyword groups (one
//! highlight class per group), comment delimiters and feature flags. Profiles
//! are selected once per file name and borrowed (`&'static`) by the row store.
//!
//! Pattern rules:
//! * a pattern starting with `.` must equal the file's extension (including the dot);
//! * any other pattern matches as a substring of the file name.

use crate::Highlight;
use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 0b0000_0001;
        const STRINGS = 0b0000_0010;
        /// `'` opens a string only for a closed char literal (`'a'`, `'\n'`),
        /// so lifetimes stay plain text.
        const CHAR_LITERALS = 0b0000_0100;
    }
}

/// Keywords sharing one highlight class.
#[derive(Debug)]
pub struct KeywordGroup {
    pub class: Highlight,
    pub words: &'static [&'static str],
}

#[derive(Debug)]
pub struct Syntax {
    /// Short display name shown in the status bar.
    pub name: &'static str,
    pub file_match: &'static [&'static str],
    pub keywords: &'static [KeywordGroup],
    pub line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

impl Syntax {
    /// True when `file_name` (a bare name or a path) selects this profile.
    pub fn matches(&self, file_name: &str) -> bool {
        let ext = file_name.rfind('.').map(|i| &file_name[i..]);
        self.file_match.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(*pat)
            } else {
                file_name.contains(pat)
            }
        })
    }
}

const C_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup {
        class: Highlight::KeywordCond,
        words: &["if", "else", "switch", "case", "default"],
    },
    KeywordGroup {
        class: Highlight::KeywordLoop,
        words: &["for", "while", "do", "break", "continue"],
    },
    KeywordGroup {
        class: Highlight::KeywordReturn,
        words: &["return", "goto"],
    },
    KeywordGroup {
        class: Highlight::KeywordType,
        words: &[
            "int", "long", "double", "float", "char", "unsigned", "signed", "void", "short",
            "auto", "const", "bool", "struct", "union", "enum", "typedef", "static", "extern",
            "volatile", "register", "inline", "size_t", "ssize_t",
        ],
    },
    KeywordGroup {
        class: Highlight::KeywordPreprocessor,
        words: &[
            "#include", "#define", "#undef", "#ifdef", "#ifndef", "#if", "#elif", "#else",
            "#endif", "#pragma", "#error",
        ],
    },
    KeywordGroup {
        class: Highlight::KeywordAdapter,
        words: &[
            "sizeof", "malloc", "calloc", "realloc", "free", "printf", "fprintf", "memcpy",
            "memset", "strlen", "NULL",
        ],
    },
];

const RUST_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup {
        class: Highlight::KeywordCond,
        words: &["if", "else", "match"],
    },
    KeywordGroup {
        class: Highlight::KeywordLoop,
        words: &["for", "while", "loop", "break", "continue", "in"],
    },
    KeywordGroup {
        class: Highlight::KeywordReturn,
        words: &["return"],
    },
    KeywordGroup {
        class: Highlight::KeywordType,
        words: &[
            "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
            "usize", "f32", "f64", "bool", "char", "str", "String", "Vec", "Option", "Result",
            "Self", "self", "struct", "enum", "trait", "impl", "type", "let", "mut", "const",
            "static", "pub", "fn", "mod", "use", "crate", "super", "ref", "dyn", "where",
            "unsafe", "async", "await", "move", "extern",
        ],
    },
    KeywordGroup {
        class: Highlight::KeywordPreprocessor,
        words: &[
            "#[derive", "#[cfg", "#[test", "#[allow", "#![allow", "macro_rules!",
        ],
    },
    KeywordGroup {
        class: Highlight::KeywordAdapter,
        words: &[
            "println!", "eprintln!", "format!", "vec!", "assert!", "assert_eq!", "panic!",
            "Some", "None", "Ok", "Err",
        ],
    },
];

const PYTHON_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup {
        class: Highlight::KeywordCond,
        words: &["if", "elif", "else", "try", "except", "finally", "with"],
    },
    KeywordGroup {
        class: Highlight::KeywordLoop,
        words: &["for", "while", "break", "continue", "in"],
    },
    KeywordGroup {
        class: Highlight::KeywordReturn,
        words: &["return", "yield", "pass", "raise"],
    },
    KeywordGroup {
        class: Highlight::KeywordType,
        words: &[
            "def", "class", "lambda", "import", "from", "as", "global", "nonlocal", "None",
            "True", "False", "and", "or", "not", "is",
        ],
    },
    KeywordGroup {
        class: Highlight::KeywordPreprocessor,
        words: &["@property", "@staticmethod", "@classmethod"],
    },
    KeywordGroup {
        class: Highlight::KeywordAdapter,
        words: &["print", "len", "range", "open", "super"],
    },
];

/// Highlight database, searched in order.
pub static SYNTAXES: &[Syntax] = &[
    Syntax {
        name: "c",
        file_match: &[".c", ".h", ".cpp", ".hpp", ".cc"],
        keywords: C_KEYWORDS,
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
    Syntax {
        name: "rust",
        file_match: &[".rs"],
        keywords: RUST_KEYWORDS,
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        flags: SyntaxFlags::NUMBERS
            .union(SyntaxFlags::STRINGS)
            .union(SyntaxFlags::CHAR_LITERALS),
    },
    Syntax {
        name: "python",
        file_match: &[".py"],
        keywords: PYTHON_KEYWORDS,
        line_comment: Some("#"),
        block_comment: None,
        flags: SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS),
    },
];

/// Select the first profile whose patterns match `file_name`.
pub fn select_for_name(file_name: &str) -> Option<&'static Syntax> {
    let found = SYNTAXES.iter().find(|s| s.matches(file_name));
    tracing::debug!(
        target: "syntax",
        file_name,
        profile = found.map(|s| s.name),
        "syntax_selected"
    );
    found
}

/// Look up a profile by its display name.
pub fn by_name(name: &str) -> Option<&'static Syntax> {
    SYNTAXES.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_patterns_match_exactly() {
        assert_eq!(select_for_name("main.c").map(|s| s.name), Some("c"));
        assert_eq!(select_for_name("src/lib.rs").map(|s| s.name), Some("rust"));
        assert_eq!(select_for_name("tool.py").map(|s| s.name), Some("python"));
        // `.c` must not match `.cs` or `.config`.
        assert!(select_for_name("Program.cs").is_none());
        assert!(select_for_name("app.config").is_none());
    }

    #[test]
    fn no_extension_has_no_profile() {
        assert!(select_for_name("Makefile").is_none());
        assert!(select_for_name("README").is_none());
    }

    #[test]
    fn by_name_lookup() {
        assert!(by_name("rust").is_some());
        assert!(by_name("cobol").is_none());
    }
}
