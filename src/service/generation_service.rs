use async_trait::async_trait;

use crate::clients::ollama_client::OllamaClient;
use crate::error::GenerationServiceError;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationServiceError>;
}

pub struct OllamaService {
    client: OllamaClient,
}

impl OllamaService {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextGenerator for OllamaService {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationServiceError> {
        self.client.generate(prompt, model).await
    }
}
