//! HTTP transport to the generateContent endpoint

use crate::prompt::build_request_body;
use async_trait::async_trait;
use querydash_core::{Config, QueryError};
use serde::Deserialize;

/// Sends one query to the model and returns its raw text answer
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(&self, query: &str) -> Result<String, QueryError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// `None` when the config carries no credential
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .api_key
            .as_ref()
            .map(|key| Self::new(config.generate_url(), key.clone()))
    }

    /// POST with the credential percent-encoded into the `key` parameter
    fn request(&self, query: &str) -> reqwest::RequestBuilder {
        self.client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&build_request_body(query))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn generate(&self, query: &str) -> Result<String, QueryError> {
        let response = self
            .request(query)
            .send()
            .await
            .map_err(|e| QueryError::Upstream(format!("Failed to reach the AI service: {}", e.without_url())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Upstream(format!("Failed to read AI response: {}", e.without_url())))?;

        if !(200..300).contains(&status) {
            tracing::warn!(status, "generative API returned an error");
            return Err(classify_failure(status, &body));
        }

        extract_text(&body)
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// `candidates[0].content.parts[0].text` from a success body
pub fn extract_text(body: &str) -> Result<String, QueryError> {
    let invalid = || QueryError::Upstream("Invalid response from the AI service".to_string());

    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|_| invalid())?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(invalid)
}

/// Map a non-success HTTP status to a [`QueryError`]
pub fn classify_failure(status: u16, body: &str) -> QueryError {
    match status {
        401 => QueryError::Auth,
        429 => QueryError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ErrorEnvelope>(body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Failed to process query".to_string());
            QueryError::Upstream(message)
        }
    }
}
