//! HTTP transport for the completion backend
//!
//! Blocking reqwest client used only from the worker thread, so the UI event
//! loop never blocks on the network.

use std::time::Duration;

use super::{AskRequest, AskResponse, BackendError, CompletionBackend};
use crate::config::BackendConfig;

/// HTTP client for the completion service
#[derive(Debug)]
pub struct HttpBackend {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpBackend {
    /// Create a client from the backend config section
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

impl CompletionBackend for HttpBackend {
    fn ask(&self, request: &AskRequest) -> Result<AskResponse, BackendError> {
        let url = format!("{}/api/ask", self.base_url);

        let mut builder = self.http.post(url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Api {
                code: status.as_u16(),
                message,
            });
        }

        response
            .json::<AskResponse>()
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}
