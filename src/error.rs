use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced by the copilot panel.
///
/// None of these are fatal to the process: dispatch-path errors become a
/// warning-prefixed assistant message in the target conversation, and
/// suggestion-path errors are swallowed entirely.
#[derive(Debug, Error)]
pub enum CopilotError {
    /// No default chat model configured; fails fast without a backend call
    #[error("Configure a default chat model in settings.")]
    NotConfigured,

    /// The completion backend call failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The completion worker thread is gone (channel closed)
    #[error("Completion worker unavailable")]
    WorkerUnavailable,
}
