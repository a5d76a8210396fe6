//! Prompt flows: incremental search, two-step replace and goto.
//!
//! A prompt owns the message line until `Enter` or `Esc`. Search runs after
//! every keystroke; replace and goto act only on `Enter`.

use super::DispatchResult;
use core_input::Key;
use core_state::{
    EditorState, Prompt, PromptKind, SearchDirection, SearchSession, parse_goto,
};
use core_text::Position;

pub(crate) fn begin(state: &mut EditorState, kind: PromptKind) -> DispatchResult {
    state.exit_selection();
    if kind == PromptKind::Search {
        state.search = Some(SearchSession::new(state.saved_view()));
    }
    tracing::debug!(target: "actions.dispatch", prompt = kind.label(), "prompt_open");
    state.prompt = Some(Prompt::new(kind));
    DispatchResult::dirty()
}

pub(crate) fn handle_prompt_key(state: &mut EditorState, key: Key) -> DispatchResult {
    let Some(prompt) = state.prompt.as_mut() else {
        return DispatchResult::clean();
    };
    let is_search = prompt.kind == PromptKind::Search;
    match key {
        Key::Escape => cancel(state),
        Key::Enter => confirm(state),
        Key::Backspace | Key::Ctrl(b'h') | Key::Delete => {
            if prompt.backspace() && is_search {
                search_step(state, None);
            }
            DispatchResult::dirty()
        }
        Key::Char(b) => {
            if prompt.push(b) && is_search {
                search_step(state, None);
            }
            DispatchResult::dirty()
        }
        Key::ArrowDown | Key::ArrowRight if is_search => {
            search_step(state, Some(SearchDirection::Forward));
            DispatchResult::dirty()
        }
        Key::ArrowUp | Key::ArrowLeft if is_search => {
            search_step(state, Some(SearchDirection::Backward));
            DispatchResult::dirty()
        }
        _ => DispatchResult::clean(),
    }
}

/// Feed the prompt input to the session and jump to the next match. The
/// cursor stays put when nothing matches.
fn search_step(state: &mut EditorState, direction: Option<SearchDirection>) {
    let (Some(prompt), Some(session)) = (state.prompt.as_ref(), state.search.as_mut()) else {
        return;
    };
    session.set_query(prompt.input());
    if let Some(d) = direction {
        session.set_direction(d);
    }
    if let Some(m) = session.find_next(&state.doc) {
        state.view.cursor = Position::new(m.x, m.y);
        state.search_match = Some(m);
    }
}

fn cancel(state: &mut EditorState) -> DispatchResult {
    let Some(prompt) = state.prompt.take() else {
        return DispatchResult::clean();
    };
    match prompt.kind {
        PromptKind::Search => {
            if let Some(session) = state.search.take() {
                state.restore_view(session.saved());
            }
            state.status = None;
        }
        PromptKind::ReplaceQuery | PromptKind::ReplaceWith { .. } => {
            state.set_status("Replace cancelled")
        }
        PromptKind::Goto => {}
    }
    tracing::debug!(target: "actions.dispatch", prompt = prompt.kind.label(), "prompt_cancel");
    DispatchResult::dirty()
}

fn confirm(state: &mut EditorState) -> DispatchResult {
    let Some(prompt) = state.prompt.take() else {
        return DispatchResult::clean();
    };
    match prompt.kind {
        PromptKind::Search => {
            let found = state
                .search
                .take()
                .and_then(|s| s.last_match())
                .is_some();
            if !found {
                if prompt.input().is_empty() {
                    state.set_status("Search: empty query");
                } else {
                    state.set_status(format!("Search: '{}' not found", prompt.input_lossy()));
                }
            }
        }
        PromptKind::ReplaceQuery => {
            if prompt.input().is_empty() {
                state.set_status("Replace: empty query");
            } else {
                state.prompt = Some(Prompt::new(PromptKind::ReplaceWith {
                    query: prompt.input().to_vec(),
                }));
            }
        }
        PromptKind::ReplaceWith { ref query } => {
            let count = state.doc.replace_all(query, prompt.input());
            state.clamp_cursor();
            tracing::debug!(target: "actions.dispatch", count, "replace_all");
            state.set_status(format!("Replaced {count} occurrence(s)"));
        }
        PromptKind::Goto => match parse_goto(&prompt.input_lossy()) {
            Ok(target) => {
                state.view.cursor = target.resolve(&state.doc);
                state.status = None;
            }
            Err(e) => state.set_status(e.to_string()),
        },
    }
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::SearchMatch;
    use core_text::{DEFAULT_TAB_WIDTH, Document};
    use pretty_assertions::assert_eq;

    fn state(text: &str) -> EditorState {
        EditorState::new(
            Document::from_bytes(text.as_bytes(), DEFAULT_TAB_WIDTH),
            core_state::Settings::default(),
        )
    }

    fn type_str(st: &mut EditorState, s: &str) {
        for b in s.bytes() {
            handle_prompt_key(st, Key::Char(b));
        }
    }

    fn status(st: &EditorState) -> &str {
        st.status.as_ref().map_or("", |m| m.text.as_str())
    }

    #[test]
    fn incremental_search_moves_cursor() {
        let mut st = state("alpha\nbeta\ngamma beta\n");
        begin(&mut st, PromptKind::Search);
        type_str(&mut st, "be");
        assert_eq!(st.view.cursor, Position::new(0, 1));
        assert_eq!(st.search_match, Some(SearchMatch { y: 1, x: 0, len: 2 }));
        handle_prompt_key(&mut st, Key::ArrowDown);
        assert_eq!(st.view.cursor, Position::new(6, 2));
        handle_prompt_key(&mut st, Key::ArrowUp);
        assert_eq!(st.view.cursor, Position::new(0, 1));
    }

    #[test]
    fn escape_restores_view() {
        let mut st = state("alpha\nbeta\n");
        st.view.cursor = Position::new(3, 0);
        begin(&mut st, PromptKind::Search);
        type_str(&mut st, "beta");
        assert_eq!(st.view.cursor, Position::new(0, 1));
        handle_prompt_key(&mut st, Key::Escape);
        assert_eq!(st.view.cursor, Position::new(3, 0));
        assert!(st.prompt.is_none());
        assert!(st.search.is_none());
    }

    #[test]
    fn enter_keeps_match() {
        let mut st = state("alpha\nbeta\n");
        begin(&mut st, PromptKind::Search);
        type_str(&mut st, "ta");
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(st.view.cursor, Position::new(2, 1));
        assert!(st.prompt.is_none());
    }

    #[test]
    fn missing_match_leaves_cursor_and_reports() {
        let mut st = state("alpha\n");
        st.view.cursor = Position::new(2, 0);
        begin(&mut st, PromptKind::Search);
        type_str(&mut st, "zz");
        assert_eq!(st.view.cursor, Position::new(2, 0));
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(status(&st), "Search: 'zz' not found");

        begin(&mut st, PromptKind::Search);
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(status(&st), "Search: empty query");
    }

    #[test]
    fn replace_two_steps() {
        let mut st = state("foo bar foo\nfoo\n");
        begin(&mut st, PromptKind::ReplaceQuery);
        type_str(&mut st, "foo");
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(
            st.prompt.as_ref().map(|p| p.kind.clone()),
            Some(PromptKind::ReplaceWith {
                query: b"foo".to_vec()
            })
        );
        type_str(&mut st, "qux");
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(st.doc.rows_to_string(), b"qux bar qux\nqux\n".to_vec());
        assert_eq!(status(&st), "Replaced 3 occurrence(s)");
    }

    #[test]
    fn replace_rejects_empty_query() {
        let mut st = state("foo\n");
        begin(&mut st, PromptKind::ReplaceQuery);
        handle_prompt_key(&mut st, Key::Enter);
        assert!(st.prompt.is_none());
        assert_eq!(status(&st), "Replace: empty query");
        assert!(!st.doc.is_dirty());
    }

    #[test]
    fn goto_clamps_and_rejects() {
        let mut st = state("one\ntwo\nthree\n");
        begin(&mut st, PromptKind::Goto);
        type_str(&mut st, "99:99");
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(st.view.cursor, Position::new(5, 2));

        begin(&mut st, PromptKind::Goto);
        type_str(&mut st, "x1");
        handle_prompt_key(&mut st, Key::Enter);
        assert_eq!(st.view.cursor, Position::new(5, 2));
        assert_eq!(status(&st), "Goto: invalid line:column 'x1'");
    }

    #[test]
    fn backspace_edits_the_query() {
        let mut st = state("ab\nac\n");
        begin(&mut st, PromptKind::Search);
        type_str(&mut st, "ac");
        assert_eq!(st.view.cursor.y, 1);
        handle_prompt_key(&mut st, Key::Backspace);
        assert_eq!(st.prompt.as_ref().unwrap().input(), b"a");
        // query changed: the scan restarts from the first row
        assert_eq!(st.view.cursor.y, 0);
    }
}
