//! Modal input line shared by search, replace and goto.

/// What the prompt's input feeds once confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    ReplaceQuery,
    ReplaceWith { query: Vec<u8> },
    Goto,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Search => "Search",
            PromptKind::ReplaceQuery => "Replace",
            PromptKind::ReplaceWith { .. } => "Replace with",
            PromptKind::Goto => "Goto line[:column]",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            PromptKind::Search => " (ESC/Arrows/Enter)",
            _ => " (ESC to cancel)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    input: Vec<u8>,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: Vec::new(),
        }
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn input_lossy(&self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }

    /// Append a printable byte; control bytes are ignored.
    pub fn push(&mut self, b: u8) -> bool {
        if b < 0x20 || b == 0x7f {
            return false;
        }
        self.input.push(b);
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Message-line text: `Label: input (hint)`.
    pub fn display(&self) -> String {
        format!(
            "{}: {}{}",
            self.kind.label(),
            self.input_lossy(),
            self.kind.hint()
        )
    }
}
