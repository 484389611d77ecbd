pub mod azure;

use async_trait::async_trait;
use std::sync::Arc;

use self::azure::AzureEmbeddingClient;
use super::{ ModelClient, ProviderError };

#[derive(Debug, Clone)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}

#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed(&self, text: &str) -> Result<EmbeddingResponse, ProviderError>;
}

pub fn new_client(
    model: &ModelClient,
    deployment: &str
) -> Arc<dyn EmbeddingClient> {
    Arc::new(AzureEmbeddingClient::new(model.clone(), deployment))
}
