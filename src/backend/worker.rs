//! Completion worker thread
//!
//! Bridges the UI event loop and the network. Receives requests via channel,
//! makes exactly one backend call per request, and sends the tagged outcome
//! back to the main thread. The worker never touches panel state.

use std::sync::mpsc::{Receiver, Sender};

use super::{BackendError, CompletionBackend};
use crate::backend::AskRequest;
use crate::conversation::{ConversationId, Mode};

/// Identifies which track a completion outcome belongs to
///
/// Chat outcomes carry the conversation id captured at dispatch time so the
/// result applies to that conversation regardless of current UI focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeTag {
    /// A message dispatch in `ask` or `edit` mode
    Chat {
        conversation: ConversationId,
        mode: Mode,
        request_id: u64,
    },
    /// A ghost-suggestion generation
    Suggest { request_id: u64 },
}

/// A request for the worker thread
#[derive(Debug)]
pub struct CompletionRequest {
    pub ask: AskRequest,
    pub tag: OutcomeTag,
}

/// The normalized result of a completion request
///
/// `result` is either the answer text or a human-readable failure message.
#[derive(Debug)]
pub struct CompletionOutcome {
    pub tag: OutcomeTag,
    pub result: Result<String, String>,
}

/// Spawn the completion worker thread
///
/// A backend construction error is carried into the loop: the worker stays
/// alive and answers every request with a failure so the panel remains
/// usable without a reachable service.
pub fn spawn_worker(
    backend: Result<Box<dyn CompletionBackend>, BackendError>,
    request_rx: Receiver<CompletionRequest>,
    response_tx: Sender<CompletionOutcome>,
) {
    std::thread::spawn(move || {
        worker_loop(backend, request_rx, response_tx);
    });
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop(
    backend: Result<Box<dyn CompletionBackend>, BackendError>,
    request_rx: Receiver<CompletionRequest>,
    response_tx: Sender<CompletionOutcome>,
) {
    let backend = match backend {
        Ok(b) => Some(b),
        Err(e) => {
            log::debug!("completion backend not available: {e}");
            None
        }
    };

    while let Ok(request) = request_rx.recv() {
        let result = match &backend {
            Some(backend) => backend
                .ask(&request.ask)
                .map(|response| response.answer)
                .map_err(|e| e.to_string()),
            None => Err(
                "Completion backend not configured. Set backend.base_url in config.".to_string(),
            ),
        };

        if response_tx
            .send(CompletionOutcome {
                tag: request.tag,
                result,
            })
            .is_err()
        {
            // Main thread disconnected
            return;
        }
    }

    log::debug!("completion worker shutting down");
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
