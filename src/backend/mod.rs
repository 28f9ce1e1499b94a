//! Completion backend abstraction
//!
//! Defines the `CompletionBackend` trait, the wire types for the single
//! `ask` operation, and the error types shared by transport implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod http;
pub mod worker;

pub use http::HttpBackend;

/// Errors that can occur while talking to the completion service
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network error during the API request
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Failed to parse the API response
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Request body for the `ask` operation
///
/// Model identifiers are opaque strings resolved from configuration. The
/// service accepts three model slots; the panel fills all of them with the
/// default chat model.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub strategy_model: String,
    pub answer_model: String,
    pub final_answer_model: String,
}

impl AskRequest {
    /// Build a request using a single model for every slot
    pub fn new(question: String, model: &str) -> Self {
        Self {
            question,
            strategy_model: model.to_string(),
            answer_model: model.to_string(),
            final_answer_model: model.to_string(),
        }
    }
}

/// Response body for the `ask` operation
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// A completion service reachable from the worker thread
///
/// Implementations make exactly one call per `ask` invocation; retries, if
/// any, belong to the transport.
pub trait CompletionBackend: Send {
    fn ask(&self, request: &AskRequest) -> Result<AskResponse, BackendError>;
}
