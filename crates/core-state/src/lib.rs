//! Editor state: the single aggregate the main loop owns and lends out by
//! `&mut` to the controller and by `&` to the renderer.
//!
//! Holds the document, the cursor and view offsets, the editing mode and
//! selection anchor, the clipboard, the active prompt (search / replace /
//! goto), the transient search session, the status message and the settings
//! derived from configuration. Nothing here touches the terminal.

use core_config::{ColourConfig, Config, Indent};
use core_text::{Document, Position};
use std::time::{Duration, Instant};

pub mod goto;
pub mod prompt;
pub mod search;
pub mod selection;

pub use goto::{GotoError, GotoTarget, parse_goto};
pub use prompt::{Prompt, PromptKind};
pub use search::{SavedView, SearchDirection, SearchMatch, SearchSession};
pub use selection::{Clipboard, SelectionSpan};

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find | \
Ctrl-R = find & replace | Ctrl-G = goto | Ctrl-D = selection mode | Ctrl-A = select all";

pub const SELECTION_MESSAGE: &str =
    "Selection mode: ESC = exit | arrows = select | Ctrl-C = copy";

/// Rows reserved below the text area (status bar + message line).
pub const RESERVED_ROWS: usize = 2;

/// Minimum digits shown in the line-number gutter.
const GUTTER_MIN_DIGITS: usize = 5;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    /// Cursor motions extend the span from the selection anchor.
    Select,
}

/// Cursor plus the scroll offsets of the single view.
///
/// `row_offset` is in rows, `column_offset` in rendered columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub cursor: Position,
    pub row_offset: usize,
    pub column_offset: usize,
}

/// Runtime settings derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tab_width: usize,
    pub line_numbers: bool,
    pub indent: Indent,
    pub quit_times: u32,
    pub message_timeout: Duration,
    pub escape_timeout: Duration,
    pub colours: ColourConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Self {
        let editor = &cfg.file.editor;
        Self {
            tab_width: editor.tab_width.max(1),
            line_numbers: editor.line_numbers,
            indent: editor.indent,
            quit_times: editor.quit_times,
            message_timeout: cfg.message_timeout(),
            escape_timeout: cfg.escape_timeout(),
            colours: cfg.file.colours.clone(),
        }
    }

    /// Bytes inserted for one Tab key press.
    pub fn indent_unit(&self) -> Vec<u8> {
        match self.indent {
            Indent::Tabs => vec![b'\t'],
            Indent::Spaces => vec![b' '; self.tab_width],
        }
    }
}

/// Status message shown on the message line until it ages out.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

pub struct EditorState {
    pub doc: Document,
    pub view: View,
    pub mode: Mode,
    /// Fixed end of the selection while in `Mode::Select`.
    pub anchor: Option<Position>,
    pub clipboard: Clipboard,
    pub prompt: Option<Prompt>,
    pub search: Option<SearchSession>,
    /// Match highlighted by the next frame only.
    pub search_match: Option<SearchMatch>,
    pub status: Option<StatusMessage>,
    /// Ctrl-Q presses still needed to discard unsaved changes.
    pub quit_remaining: u32,
    pub settings: Settings,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl EditorState {
    pub fn new(doc: Document, settings: Settings) -> Self {
        Self {
            doc,
            view: View::default(),
            mode: Mode::Edit,
            anchor: None,
            clipboard: Clipboard::default(),
            prompt: None,
            search: None,
            search_match: None,
            status: None,
            quit_remaining: settings.quit_times,
            settings,
            screen_rows: 24,
            screen_cols: 80,
        }
    }

    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.screen_rows = rows;
        self.screen_cols = cols;
    }

    /// Rows available for document text.
    pub fn text_rows(&self) -> usize {
        self.screen_rows.saturating_sub(RESERVED_ROWS)
    }

    /// Width of the line-number gutter, `0` when disabled or when the screen
    /// is too narrow to leave a text column beside it.
    pub fn gutter_width(&self) -> usize {
        if !self.settings.line_numbers {
            return 0;
        }
        let digits = self.doc.row_count().to_string().len();
        let width = digits.max(GUTTER_MIN_DIGITS) + 2;
        if width >= self.screen_cols { 0 } else { width }
    }

    /// Columns available for document text (screen width minus gutter).
    pub fn text_cols(&self) -> usize {
        self.screen_cols.saturating_sub(self.gutter_width())
    }

    pub fn cursor(&self) -> Position {
        self.view.cursor
    }

    /// Rendered column of the cursor in its row.
    pub fn cursor_rx(&self) -> usize {
        let c = self.view.cursor;
        self.doc
            .row(c.y)
            .map_or(0, |row| row.cx_to_rx(c.x, self.doc.tab_width()))
    }

    /// Keep the cursor inside the document.
    pub fn clamp_cursor(&mut self) {
        self.view.cursor = self.doc.clamp(self.view.cursor);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(target: "actions.dispatch", len = text.len(), "status_message");
        self.status = Some(StatusMessage {
            text,
            set_at: Instant::now(),
        });
    }

    /// Status text if younger than the configured timeout at `now`.
    pub fn visible_status(&self, now: Instant) -> Option<&str> {
        let msg = self.status.as_ref()?;
        if now.saturating_duration_since(msg.set_at) < self.settings.message_timeout {
            Some(&msg.text)
        } else {
            None
        }
    }

    /// Drop an expired status message. Returns true when one was removed.
    pub fn tick_status(&mut self, now: Instant) -> bool {
        if self.status.is_some() && self.visible_status(now).is_none() {
            self.status = None;
            return true;
        }
        false
    }

    pub fn reset_quit_counter(&mut self) {
        self.quit_remaining = self.settings.quit_times;
    }

    /// Order-normalized selection span while in selection mode.
    pub fn selection(&self) -> Option<SelectionSpan> {
        if self.mode != Mode::Select {
            return None;
        }
        let anchor = self.anchor?;
        Some(SelectionSpan::new(
            self.doc.clamp(anchor),
            self.doc.clamp(self.view.cursor),
        ))
    }

    pub fn enter_selection(&mut self) {
        self.mode = Mode::Select;
        self.anchor = Some(self.view.cursor);
    }

    pub fn exit_selection(&mut self) {
        self.mode = Mode::Edit;
        self.anchor = None;
    }

    /// Select the whole document: anchor at the origin, cursor at the end.
    pub fn select_all(&mut self) {
        let last = self.doc.row_count() - 1;
        self.mode = Mode::Select;
        self.anchor = Some(Position::origin());
        self.view.cursor = Position::new(self.doc.row_len(last), last);
    }

    pub fn saved_view(&self) -> SavedView {
        SavedView {
            cursor: self.view.cursor,
            row_offset: self.view.row_offset,
            column_offset: self.view.column_offset,
        }
    }

    pub fn restore_view(&mut self, saved: SavedView) {
        self.view.cursor = saved.cursor;
        self.view.row_offset = saved.row_offset;
        self.view.column_offset = saved.column_offset;
        self.clamp_cursor();
    }
}
