#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, handle_key};
use core_input::{Decoder, ScriptedBytes, Step};
use core_state::{EditorState, Settings};
use core_text::{DEFAULT_TAB_WIDTH, Document};

pub fn state_from(text: &str) -> EditorState {
    let mut st = EditorState::new(
        Document::from_bytes(text.as_bytes(), DEFAULT_TAB_WIDTH),
        Settings::default(),
    );
    st.set_screen_size(24, 80);
    st
}

/// A lone Escape press: the byte followed by a read timeout.
pub const ESCAPE: [Step; 2] = [Step::Byte(0x1b), Step::Timeout];

/// Decode `bytes` as terminal input and dispatch every key. Returns the
/// result of the last key.
pub fn feed(state: &mut EditorState, bytes: &[u8]) -> DispatchResult {
    feed_steps(state, bytes.iter().copied().map(Step::Byte))
}

pub fn feed_steps(
    state: &mut EditorState,
    steps: impl IntoIterator<Item = Step>,
) -> DispatchResult {
    let decoder = Decoder::default();
    let mut src = ScriptedBytes::new(steps);
    let mut last = DispatchResult::clean();
    while src.remaining() > 0 {
        let key = decoder.read_key(&mut src).expect("scripted key");
        last = handle_key(state, key);
        if last.quit {
            break;
        }
    }
    last
}

pub fn text(state: &EditorState) -> String {
    String::from_utf8(state.doc.rows_to_string()).expect("utf8 document")
}

pub fn status(state: &EditorState) -> &str {
    state.status.as_ref().map_or("", |m| m.text.as_str())
}
