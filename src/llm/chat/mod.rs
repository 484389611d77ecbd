pub mod azure;

use async_trait::async_trait;
use std::sync::Arc;

use self::azure::AzureChatClient;
use super::{ ModelClient, ProviderError };
use crate::models::chat::Turn;
use crate::rag::data_source::DataSource;

/// One chat-completion call: the full message list plus, for delegated
/// retrieval, the provider-side data sources.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<Turn>,
    pub data_sources: Vec<DataSource>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Turn>) -> Self {
        Self { messages, data_sources: Vec::new() }
    }

    pub fn with_data_source(mut self, source: DataSource) -> Self {
        self.data_sources.push(source);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, ProviderError>;

    fn get_model(&self) -> String;
}

pub fn new_client(
    model: &ModelClient,
    deployment: &str
) -> Arc<dyn ChatClient> {
    Arc::new(AzureChatClient::new(model.clone(), deployment))
}
