//! Submission to the hosted form backend
//!
//! The network call sits behind [`FormSubmitter`] so the controller can be
//! driven by a mock in tests. [`HttpFormSubmitter`] is the real thing and
//! runs unchanged natively and in the browser (where reqwest uses `fetch`).

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// HTTP method declared on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMethod {
    Get,
    #[default]
    Post,
}

impl SubmitMethod {
    /// Parse the `method` attribute; anything but `get` means POST
    pub fn from_attribute(method: Option<&str>) -> Self {
        match method {
            Some(m) if m.trim().eq_ignore_ascii_case("get") => SubmitMethod::Get,
            _ => SubmitMethod::Post,
        }
    }
}

/// Serialized form fields, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    pairs: Vec<(String, String)>,
}

impl FormPayload {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// One submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub endpoint: Url,
    pub method: SubmitMethod,
    pub payload: FormPayload,
}

/// Raw backend response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Accept a 2xx JSON body; anything else becomes a [`SubmitError`]
    pub fn into_result(self) -> Result<serde_json::Value, SubmitError> {
        if !self.is_success() {
            return Err(SubmitError::Rejected {
                status: self.status,
                body: self.body,
            });
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("Form submission failed with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    errors: Vec<ServerErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ServerErrorEntry {
    #[serde(default)]
    message: String,
}

impl SubmitError {
    /// Messages from a structured `{"errors": [{"message": ...}]}` body,
    /// joined by commas
    pub fn server_messages(&self) -> Option<String> {
        let SubmitError::Rejected { body, .. } = self else {
            return None;
        };
        let parsed: ServerErrorBody = serde_json::from_str(body).ok()?;
        let joined = parsed
            .errors
            .into_iter()
            .map(|entry| entry.message)
            .collect::<Vec<_>>()
            .join(", ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// Capability that delivers a form to its backend
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait FormSubmitter {
    /// Send one request. Any HTTP status is `Ok`; only transport failures
    /// are `Err`.
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmitResponse, SubmitError>;
}

/// reqwest-backed submitter
#[derive(Debug, Clone, Default)]
pub struct HttpFormSubmitter {
    client: reqwest::Client,
}

impl HttpFormSubmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl FormSubmitter for HttpFormSubmitter {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmitResponse, SubmitError> {
        let endpoint = request.endpoint.clone();
        let builder = match request.method {
            SubmitMethod::Post => self.client.post(endpoint).form(request.payload.pairs()),
            SubmitMethod::Get => self.client.get(endpoint).query(request.payload.pairs()),
        };

        let response = builder
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        tracing::debug!(status, body = %body, "form backend responded");
        Ok(SubmitResponse { status, body })
    }
}
