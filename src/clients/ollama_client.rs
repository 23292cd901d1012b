use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::GenerationServiceError;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Blocking-per-request client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    host: String,
}

impl OllamaClient {
    pub fn new(host: &str, timeout: Duration) -> Result<Self, GenerationServiceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationServiceError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        info!(model, host = %self.host, prompt_chars = prompt.len(), "requesting generation");
        let response = self
            .http
            .post(format!("{}/api/generate", self.host))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?; // read the body once

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "generation request rejected");
            return Err(GenerationServiceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|source| GenerationServiceError::Decode { body: text.clone(), source })?;
        Ok(parsed.response)
    }
}
