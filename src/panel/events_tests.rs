//! Tests for panel key handling

use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::backend::worker::{CompletionOutcome, CompletionRequest};
use crate::config::Config;
use crate::context::NotebookContext;
use crate::conversation::Mode;
use crate::draft::DraftHost;
use crate::panel::PanelState;

#[derive(Default)]
struct TestDraft {
    text: String,
    updates: usize,
}

impl TestDraft {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            updates: 0,
        }
    }
}

impl DraftHost for TestDraft {
    fn draft(&self) -> &str {
        &self.text
    }

    fn update(&mut self, text: String) {
        self.updates += 1;
        self.text = text;
    }
}

fn panel() -> (
    PanelState,
    mpsc::Receiver<CompletionRequest>,
    mpsc::Sender<CompletionOutcome>,
) {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let mut config = Config::default();
    config.models.default_chat_model = Some("model-a".to_string());
    let panel = PanelState::new(
        &config,
        "nb-1".to_string(),
        NotebookContext::default(),
        request_tx,
        response_rx,
    );
    (panel, request_rx, response_tx)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn make_suggestion_visible(
    panel: &mut PanelState,
    request_rx: &mpsc::Receiver<CompletionRequest>,
    response_tx: &mpsc::Sender<CompletionOutcome>,
    draft: &mut TestDraft,
    text: &str,
) {
    panel.generate_suggestion(draft);
    let request = request_rx.recv().unwrap();
    response_tx
        .send(CompletionOutcome {
            tag: request.tag,
            result: Ok(text.to_string()),
        })
        .unwrap();
    panel.poll_outcomes(draft);
    assert!(panel.suggestions.is_visible());
}

#[test]
fn test_typing_goes_to_prompt() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();

    for c in "hello".chars() {
        panel.handle_key_event(key(KeyCode::Char(c)), &mut draft);
    }
    assert_eq!(panel.prompt_text(), "hello");
}

#[test]
fn test_tab_accepts_visible_suggestion_and_is_consumed() {
    let (mut panel, request_rx, response_tx) = panel();
    let mut draft = TestDraft::new("Draft. ");
    make_suggestion_visible(&mut panel, &request_rx, &response_tx, &mut draft, "More.");

    panel.handle_key_event(key(KeyCode::Tab), &mut draft);

    assert_eq!(draft.text, "Draft. More.");
    assert_eq!(draft.updates, 1);
    assert!(!panel.suggestions.is_visible());
    // The keystroke did not reach the prompt
    assert!(panel.prompt_text().is_empty());
}

#[test]
fn test_tab_without_suggestion_reaches_prompt() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.handle_key_event(key(KeyCode::Tab), &mut draft);
    assert_eq!(draft.updates, 0);
    // tui-textarea inserts an indent for an unhandled Tab
    assert!(!panel.prompt_text().is_empty());
}

#[test]
fn test_esc_rejects_visible_suggestion() {
    let (mut panel, request_rx, response_tx) = panel();
    let mut draft = TestDraft::new("Draft. ");
    make_suggestion_visible(&mut panel, &request_rx, &response_tx, &mut draft, "More.");

    panel.handle_key_event(key(KeyCode::Esc), &mut draft);

    assert!(!panel.suggestions.is_visible());
    assert_eq!(draft.text, "Draft. ");
    assert_eq!(draft.updates, 0);
}

#[test]
fn test_enter_submits_prompt() {
    let (mut panel, request_rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.prompt.insert_str("a question");
    panel.handle_key_event(key(KeyCode::Enter), &mut draft);

    assert!(panel.awaiting_response);
    assert!(request_rx.try_recv().is_ok());
}

#[test]
fn test_ctrl_enter_also_submits() {
    let (mut panel, request_rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.prompt.insert_str("a question");
    panel.handle_key_event(
        KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL),
        &mut draft,
    );
    assert!(request_rx.try_recv().is_ok());
}

#[test]
fn test_shift_enter_inserts_newline_instead_of_submitting() {
    let (mut panel, request_rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.prompt.insert_str("line one");
    panel.handle_key_event(
        KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT),
        &mut draft,
    );
    panel.prompt.insert_str("line two");

    assert_eq!(panel.prompt_text(), "line one\nline two");
    assert!(request_rx.try_recv().is_err());
}

#[test]
fn test_ctrl_t_toggles_mode_and_clears_prompt() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.prompt.insert_str("half-typed");
    panel.handle_key_event(ctrl('t'), &mut draft);

    assert_eq!(panel.mode, Mode::Edit);
    assert!(panel.prompt_text().is_empty());

    panel.handle_key_event(ctrl('t'), &mut draft);
    assert_eq!(panel.mode, Mode::Ask);
}

#[test]
fn test_ctrl_n_creates_new_chat() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.handle_key_event(ctrl('n'), &mut draft);
    panel.handle_key_event(ctrl('n'), &mut draft);

    assert_eq!(panel.store.len(), 2);
}

#[test]
fn test_ctrl_d_deletes_active_chat() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();
    panel.new_chat();

    panel.handle_key_event(ctrl('d'), &mut draft);
    assert!(panel.store.is_empty());
    assert!(panel.store.active_id().is_none());
}

#[test]
fn test_alt_arrows_walk_conversations() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();
    let oldest = panel.store.create("a").id.clone();
    let newest = panel.store.create("b").id.clone();

    panel.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::ALT), &mut draft);
    assert_eq!(panel.store.active_id(), Some(oldest.as_str()));

    panel.handle_key_event(KeyEvent::new(KeyCode::Up, KeyModifiers::ALT), &mut draft);
    assert_eq!(panel.store.active_id(), Some(newest.as_str()));
}

#[test]
fn test_f2_rename_flow() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();
    panel.new_chat();

    panel.handle_key_event(key(KeyCode::F(2)), &mut draft);
    assert!(panel.editing_title);

    // Typing while renaming edits the title buffer, not the prompt
    panel.handle_key_event(key(KeyCode::Backspace), &mut draft);
    for c in "s".chars() {
        panel.handle_key_event(key(KeyCode::Char(c)), &mut draft);
    }
    panel.handle_key_event(key(KeyCode::Enter), &mut draft);

    assert!(!panel.editing_title);
    assert_eq!(panel.store.active().unwrap().title, "New Chas");
    assert!(panel.prompt_text().is_empty());
}

#[test]
fn test_f2_rename_esc_cancels() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();
    panel.new_chat();

    panel.handle_key_event(key(KeyCode::F(2)), &mut draft);
    panel.handle_key_event(key(KeyCode::Char('x')), &mut draft);
    panel.handle_key_event(key(KeyCode::Esc), &mut draft);

    assert!(!panel.editing_title);
    assert_eq!(
        panel.store.active().unwrap().title,
        crate::conversation::DEFAULT_TITLE
    );
}

#[test]
fn test_ctrl_c_quits() {
    let (mut panel, _rx, _tx) = panel();
    let mut draft = TestDraft::default();

    panel.handle_key_event(ctrl('c'), &mut draft);
    assert!(panel.should_quit);
}

#[test]
fn test_ctrl_g_triggers_suggestion_generation() {
    let (mut panel, request_rx, _tx) = panel();
    let mut draft = TestDraft::new("draft body");

    panel.handle_key_event(ctrl('g'), &mut draft);

    assert!(panel.suggestions.is_generating());
    let request = request_rx.recv().unwrap();
    assert!(request.ask.question.contains("draft body"));
}
