//! Inline ghost-text suggestions
//!
//! Generates a single continuation candidate for the draft and exposes
//! accept/reject. At most one suggestion is live at a time (singleton slot)
//! and at most one generation is in flight; suggestions are a non-critical
//! enhancement, so backend failures are swallowed.

use std::sync::mpsc::Sender;

use crate::backend::worker::{CompletionRequest, OutcomeTag};
use crate::backend::AskRequest;

/// An inline, not-yet-committed completion candidate for the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub text: String,
    pub is_visible: bool,
    pub is_accepted: bool,
    pub is_rejected: bool,
}

/// Owns the suggestion slot and the in-flight generation guard
#[derive(Debug)]
pub struct SuggestionEngine {
    request_tx: Sender<CompletionRequest>,
    chat_model: Option<String>,
    slot: Option<Suggestion>,
    is_generating: bool,
    request_id: u64,
    next_suggestion_id: u64,
}

impl SuggestionEngine {
    pub fn new(request_tx: Sender<CompletionRequest>, chat_model: Option<String>) -> Self {
        Self {
            request_tx,
            chat_model,
            slot: None,
            is_generating: false,
            request_id: 0,
            next_suggestion_id: 0,
        }
    }

    pub fn current(&self) -> Option<&Suggestion> {
        self.slot.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.slot.as_ref().is_some_and(|s| s.is_visible)
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// Request a continuation of the draft
    ///
    /// Silent no-op when no model is configured or a generation is already in
    /// flight.
    pub fn generate(&mut self, draft: &str, context_summary: &str) {
        let Some(model) = self.chat_model.as_deref() else {
            return;
        };
        if self.is_generating {
            return;
        }

        let question = continuation_prompt(draft, context_summary);
        self.request_id = self.request_id.wrapping_add(1);
        let request = CompletionRequest {
            ask: AskRequest::new(question, model),
            tag: OutcomeTag::Suggest {
                request_id: self.request_id,
            },
        };

        // Suggestions are best-effort: a dead worker just means no candidate
        if self.request_tx.send(request).is_ok() {
            self.is_generating = true;
        }
    }

    /// Apply a generation outcome
    ///
    /// A non-empty trimmed answer replaces any existing suggestion; a blank
    /// answer produces nothing. Failures are debug-logged only. The in-flight
    /// guard is released on every terminal outcome.
    pub fn apply_outcome(&mut self, request_id: u64, result: Result<String, String>) {
        if request_id != self.request_id {
            log::debug!("ignoring stale suggestion outcome {request_id}");
            return;
        }
        self.is_generating = false;

        match result {
            Ok(answer) => {
                let text = answer.trim();
                if text.is_empty() {
                    return;
                }
                self.next_suggestion_id += 1;
                self.slot = Some(Suggestion {
                    id: format!("sug-{}", self.next_suggestion_id),
                    text: text.to_string(),
                    is_visible: true,
                    is_accepted: false,
                    is_rejected: false,
                });
            }
            Err(message) => {
                log::debug!("suggestion generation failed: {message}");
            }
        }
    }

    /// Accept the current suggestion
    ///
    /// Returns the draft with the suggestion text appended and clears the
    /// slot. `None` when the slot is empty, with no draft mutation.
    pub fn accept(&mut self, current_draft: &str) -> Option<String> {
        let mut suggestion = self.slot.take()?;
        suggestion.is_accepted = true;
        Some(format!("{}{}", current_draft, suggestion.text))
    }

    /// Discard the current suggestion; no other effect
    pub fn reject(&mut self) {
        if let Some(suggestion) = self.slot.as_mut() {
            suggestion.is_rejected = true;
        }
        self.slot = None;
    }
}

/// Prompt asking for a raw continuation of the draft
pub fn continuation_prompt(draft: &str, context_summary: &str) -> String {
    format!(
        "Based on the current notebook draft and context, suggest the next \
         logical continuation. Return only the suggested text without any \
         explanation or formatting.\n\n\
         Current draft:\n{draft}\n\n\
         Context:\n{context_summary}\n\n\
         Suggest the next few lines or paragraph:"
    )
}
