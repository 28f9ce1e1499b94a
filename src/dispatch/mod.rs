//! Prompt dispatch
//!
//! Composes the combined instruction for a submission mode and hands it to
//! the completion worker, tagged with the conversation id captured at
//! dispatch time. Exactly one backend call per dispatch; no internal retry.

use std::sync::mpsc::Sender;

use crate::backend::worker::{CompletionRequest, OutcomeTag};
use crate::backend::AskRequest;
use crate::conversation::Mode;
use crate::error::CopilotError;

/// Routes prompt submissions to the completion worker
///
/// The dispatcher does not serialize requests; the controller keeps a single
/// pending flag and disables concurrent submission from the prompt input.
#[derive(Debug)]
pub struct Dispatcher {
    request_tx: Sender<CompletionRequest>,
    chat_model: Option<String>,
    notebook_id: String,
    request_id: u64,
}

impl Dispatcher {
    pub fn new(
        request_tx: Sender<CompletionRequest>,
        chat_model: Option<String>,
        notebook_id: String,
    ) -> Self {
        Self {
            request_tx,
            chat_model,
            notebook_id,
            request_id: 0,
        }
    }

    /// Whether a default chat model is configured
    pub fn is_configured(&self) -> bool {
        self.chat_model.is_some()
    }

    /// Dispatch a prompt in the given mode
    ///
    /// Fails fast with a configuration error when no default chat model is
    /// configured, without contacting the backend. Returns the request id the
    /// outcome will carry.
    pub fn dispatch(
        &mut self,
        prompt: &str,
        mode: Mode,
        draft: &str,
        context_summary: &str,
        conversation: &str,
    ) -> Result<u64, CopilotError> {
        let model = self.chat_model.as_deref().ok_or(CopilotError::NotConfigured)?;

        let question = match mode {
            Mode::Edit => compose_edit_question(prompt, draft),
            _ => compose_ask_question(prompt, draft, context_summary, &self.notebook_id),
        };

        self.request_id = self.request_id.wrapping_add(1);
        let request = CompletionRequest {
            ask: AskRequest::new(question, model),
            tag: OutcomeTag::Chat {
                conversation: conversation.to_string(),
                mode,
                request_id: self.request_id,
            },
        };

        self.request_tx
            .send(request)
            .map_err(|_| CopilotError::WorkerUnavailable)?;
        Ok(self.request_id)
    }
}

/// Compose the `ask` question embedding the draft and context summary
pub fn compose_ask_question(
    prompt: &str,
    draft: &str,
    context_summary: &str,
    notebook_id: &str,
) -> String {
    format!(
        "You are assisting with research for notebook {notebook_id}. \
         Answer the question using the draft and context when relevant.\n\n\
         Question: {prompt}\n\n\
         Current draft markdown:\n{draft}\n\n\
         Notebook context:\n{context_summary}"
    )
}

/// Compose the `edit` instruction asking for only the revised document body
pub fn compose_edit_question(prompt: &str, draft: &str) -> String {
    format!(
        "You are an expert editor rewriting the notebook draft based on the \
         instructions below.\n\n\
         INSTRUCTIONS:\n{prompt}\n\n\
         Rewrite the draft and return ONLY the revised markdown, without \
         commentary.\n\n---\n{draft}"
    )
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod dispatch_tests;
