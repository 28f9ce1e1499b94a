//! Copilot panel state
//!
//! Composition root: wires the prompt input, conversation store, dispatcher,
//! and suggestion engine together. The message-dispatch track and the
//! suggestion track carry independent in-flight flags; both outcomes arrive
//! over the same channel and are routed by tag.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use ratatui::style::Style;
use tui_textarea::TextArea;

use crate::backend::worker::{CompletionOutcome, CompletionRequest, OutcomeTag};
use crate::config::Config;
use crate::context::NotebookContext;
use crate::conversation::{ConversationStore, Mode, Role, DEFAULT_TITLE};
use crate::dispatch::Dispatcher;
use crate::draft::DraftHost;
use crate::suggest::SuggestionEngine;

/// Prefix for assistant messages that surface a failure
pub const WARNING_PREFIX: &str = "⚠️ ";

/// Panel state and composition root
pub struct PanelState {
    /// Active submission tab
    pub mode: Mode,
    /// Prompt input
    pub prompt: TextArea<'static>,
    pub store: ConversationStore,
    pub suggestions: SuggestionEngine,
    pub dispatcher: Dispatcher,
    pub response_rx: Receiver<CompletionOutcome>,
    /// A message dispatch is pending (disables submission, shows spinner)
    pub awaiting_response: bool,
    /// Request id of the pending dispatch, used to clear the flag
    pub pending_request_id: Option<u64>,
    /// Bounded digest of the notebook context, snapshotted at startup
    pub context_summary: String,
    /// Inline title rename in progress
    pub editing_title: bool,
    pub title_input: String,
    pub should_quit: bool,
}

impl PanelState {
    pub fn new(
        config: &Config,
        notebook_id: String,
        context: NotebookContext,
        request_tx: Sender<CompletionRequest>,
        response_rx: Receiver<CompletionOutcome>,
    ) -> Self {
        let chat_model = config.models.default_chat_model.clone();

        let mut prompt = TextArea::default();
        prompt.set_cursor_line_style(Style::default());

        Self {
            mode: Mode::Ask,
            prompt,
            store: ConversationStore::new(),
            suggestions: SuggestionEngine::new(request_tx.clone(), chat_model.clone()),
            dispatcher: Dispatcher::new(request_tx, chat_model, notebook_id),
            response_rx,
            awaiting_response: false,
            pending_request_id: None,
            context_summary: context.summary(),
            editing_title: false,
            title_input: String::new(),
            should_quit: false,
        }
    }

    /// Current prompt text
    pub fn prompt_text(&self) -> String {
        self.prompt.lines().join("\n")
    }

    pub fn clear_prompt(&mut self) {
        self.prompt = TextArea::default();
        self.prompt.set_cursor_line_style(Style::default());
    }

    /// Switch the submission tab, clearing the prompt input only
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear_prompt();
        }
    }

    pub fn toggle_mode(&mut self) {
        let next = match self.mode {
            Mode::Ask => Mode::Edit,
            _ => Mode::Ask,
        };
        self.set_mode(next);
    }

    /// Submit the prompt in the current mode
    ///
    /// Auto-creates a conversation when none is active, appends the user
    /// message, and dispatches. A configuration failure surfaces as a
    /// warning-prefixed assistant message without entering the pending state.
    pub fn submit(&mut self, draft: &dyn DraftHost) {
        let prompt = self.prompt_text().trim().to_string();
        if prompt.is_empty() || self.awaiting_response {
            return;
        }

        if self.store.active_id().is_none() {
            self.store.create(DEFAULT_TITLE);
        }
        let Some(conversation) = self.store.active_id().map(str::to_string) else {
            return;
        };

        self.store
            .append_message(&conversation, Role::User, self.mode, &prompt);

        match self.dispatcher.dispatch(
            &prompt,
            self.mode,
            draft.draft(),
            &self.context_summary,
            &conversation,
        ) {
            Ok(request_id) => {
                self.awaiting_response = true;
                self.pending_request_id = Some(request_id);
            }
            Err(e) => {
                self.store.append_message(
                    &conversation,
                    Role::Assistant,
                    self.mode,
                    &format!("{WARNING_PREFIX}{e}"),
                );
            }
        }
    }

    /// Drain completion outcomes, routing each by tag
    ///
    /// Called once per event-loop tick. Chat outcomes apply to the
    /// conversation captured at dispatch time, regardless of current focus.
    pub fn poll_outcomes(&mut self, draft: &mut dyn DraftHost) {
        loop {
            match self.response_rx.try_recv() {
                Ok(outcome) => match outcome.tag {
                    OutcomeTag::Chat {
                        conversation,
                        mode,
                        request_id,
                    } => self.apply_chat_outcome(&conversation, mode, request_id, outcome.result, draft),
                    OutcomeTag::Suggest { request_id } => {
                        self.suggestions.apply_outcome(request_id, outcome.result);
                    }
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Apply a message-dispatch outcome to its target conversation
    fn apply_chat_outcome(
        &mut self,
        conversation: &str,
        mode: Mode,
        request_id: u64,
        result: Result<String, String>,
        draft: &mut dyn DraftHost,
    ) {
        if self.pending_request_id == Some(request_id) {
            self.awaiting_response = false;
            self.pending_request_id = None;
        }

        match result {
            Ok(answer) => {
                self.store
                    .append_message(conversation, Role::Assistant, mode, &answer);
                if mode == Mode::Edit {
                    // Replace the draft wholesale with the revised body
                    draft.update(answer);
                }
                self.clear_prompt();
            }
            Err(message) => {
                self.store.append_message(
                    conversation,
                    Role::Assistant,
                    mode,
                    &format!("{WARNING_PREFIX}{message}"),
                );
            }
        }
    }

    /// Request a ghost suggestion for the current draft
    pub fn generate_suggestion(&mut self, draft: &dyn DraftHost) {
        let summary = self.context_summary.clone();
        self.suggestions.generate(draft.draft(), &summary);
    }

    /// Accept the visible suggestion, appending it to the draft
    ///
    /// Returns false when no suggestion is visible (no draft mutation).
    pub fn accept_suggestion(&mut self, draft: &mut dyn DraftHost) -> bool {
        if !self.suggestions.is_visible() {
            return false;
        }
        if let Some(new_draft) = self.suggestions.accept(draft.draft()) {
            draft.update(new_draft);
            return true;
        }
        false
    }

    /// Reject the visible suggestion; returns false when none is visible
    pub fn reject_suggestion(&mut self) -> bool {
        if !self.suggestions.is_visible() {
            return false;
        }
        self.suggestions.reject();
        true
    }

    /// Explicit "new chat" action
    pub fn new_chat(&mut self) {
        self.store.create(DEFAULT_TITLE);
    }

    /// Delete the active conversation
    pub fn delete_active(&mut self) {
        if let Some(id) = self.store.active_id().map(str::to_string) {
            self.store.delete(&id);
        }
    }

    /// Start editing the active conversation's title inline
    pub fn begin_title_edit(&mut self) {
        if let Some(conversation) = self.store.active() {
            self.title_input = conversation.title.clone();
            self.editing_title = true;
        }
    }

    /// Commit the edited title via rename; blank input keeps the old title
    pub fn commit_title_edit(&mut self) {
        if !self.editing_title {
            return;
        }
        let title = self.title_input.trim().to_string();
        if !title.is_empty() {
            if let Some(id) = self.store.active_id().map(str::to_string) {
                self.store.rename(&id, &title);
            }
        }
        self.editing_title = false;
        self.title_input.clear();
    }

    pub fn cancel_title_edit(&mut self) {
        self.editing_title = false;
        self.title_input.clear();
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
