use async_trait::async_trait;
use log::debug;
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, ChatRequest, CompletionResponse };
use crate::llm::{ ModelClient, ProviderError };
use crate::models::chat::Turn;
use crate::rag::data_source::DataSource;

pub struct AzureChatClient {
    model: ModelClient,
    deployment: String,
}

#[derive(Serialize)]
struct AzureChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    #[serde(skip_serializing_if = "no_sources")]
    data_sources: &'a [DataSource],
}

fn no_sources(sources: &&[DataSource]) -> bool {
    sources.is_empty()
}

#[derive(Deserialize)]
struct AzureChatResponse {
    choices: Vec<AzureChoice>,
}

#[derive(Deserialize)]
struct AzureChoice {
    message: AzureMessage,
}

#[derive(Deserialize)]
struct AzureMessage {
    content: Option<String>,
}

impl AzureChatClient {
    pub fn new(model: ModelClient, deployment: &str) -> Self {
        Self { model, deployment: deployment.to_string() }
    }
}

#[async_trait]
impl ChatClient for AzureChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, ProviderError> {
        let url = self.model.deployment_url(&self.deployment, "chat/completions");
        let body = AzureChatRequest {
            model: &self.deployment,
            messages: &request.messages,
            data_sources: &request.data_sources,
        };
        debug!(
            "Chat completion: deployment={}, messages={}, data_sources={}",
            self.deployment,
            request.messages.len(),
            request.data_sources.len()
        );

        let resp = self.model
            .post_json(url, &body).await?
            .json::<AzureChatResponse>().await?;

        let choice = resp.choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse("completion choices"))?;

        Ok(CompletionResponse { response: choice.message.content.unwrap_or_default() })
    }

    fn get_model(&self) -> String {
        self.deployment.clone()
    }
}
