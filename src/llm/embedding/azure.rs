use async_trait::async_trait;
use serde::{ Deserialize, Serialize };

use super::{ EmbeddingClient, EmbeddingResponse };
use crate::llm::{ ModelClient, ProviderError };

pub struct AzureEmbeddingClient {
    model: ModelClient,
    deployment: String,
}

#[derive(Serialize)]
struct AzureEmbeddingRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct AzureEmbeddingResponse {
    data: Vec<AzureEmbeddingData>,
}

#[derive(Deserialize)]
struct AzureEmbeddingData {
    embedding: Vec<f32>,
}

impl AzureEmbeddingClient {
    pub fn new(model: ModelClient, deployment: &str) -> Self {
        Self { model, deployment: deployment.to_string() }
    }
}

#[async_trait]
impl EmbeddingClient for AzureEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<EmbeddingResponse, ProviderError> {
        let url = self.model.deployment_url(&self.deployment, "embeddings");
        let resp = self.model
            .post_json(url, &AzureEmbeddingRequest { input: text }).await?
            .json::<AzureEmbeddingResponse>().await?;

        let embedding = resp.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or(ProviderError::EmptyResponse("embedding"))?;

        Ok(EmbeddingResponse { embedding })
    }
}
