//! Test doubles shared by unit tests.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

use crate::config::{ ModelSettings, SearchSettings };
use crate::llm::chat::{ ChatClient, ChatRequest, CompletionResponse };
use crate::llm::embedding::{ EmbeddingClient, EmbeddingResponse };
use crate::llm::ProviderError;
use crate::search::{ SearchClient, SearchDocument, SearchError };

pub fn model_settings(endpoint: &str) -> ModelSettings {
    ModelSettings {
        endpoint: Url::parse(endpoint).unwrap(),
        api_key: "model-key".to_string(),
        api_version: "2024-12-01-preview".to_string(),
        chat_deployment: "gpt-4o".to_string(),
        embedding_deployment: "text-embedding-3-small".to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn search_settings(endpoint: &str) -> SearchSettings {
    SearchSettings {
        endpoint: Url::parse(endpoint).unwrap(),
        index_name: "margies-travel".to_string(),
        api_key: "search-key".to_string(),
        api_version: "2024-03-01-preview".to_string(),
        vector_field: "contentVector".to_string(),
        content_field: "content".to_string(),
        title_field: "title".to_string(),
        top_k: 5,
        timeout: Duration::from_secs(5),
    }
}

pub fn doc(title: &str, content: &str) -> SearchDocument {
    json!({ "title": title, "content": content }).as_object().cloned().unwrap()
}

pub struct MockChat {
    reply: Result<String, u16>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChat {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Ok(reply.to_string()), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing(status: u16) -> Self {
        Self { reply: Err(status), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for MockChat {
    async fn complete(&self, request: &ChatRequest) -> Result<CompletionResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(CompletionResponse { response: text.clone() }),
            Err(status) => Err(ProviderError::Status { status: *status, body: "mock failure".to_string() }),
        }
    }

    fn get_model(&self) -> String {
        "mock-chat".to_string()
    }
}

pub struct MockEmbedding {
    vector: Result<Vec<f32>, u16>,
    inputs: Mutex<Vec<String>>,
}

impl MockEmbedding {
    pub fn returning(vector: Vec<f32>) -> Self {
        Self { vector: Ok(vector), inputs: Mutex::new(Vec::new()) }
    }

    pub fn failing(status: u16) -> Self {
        Self { vector: Err(status), inputs: Mutex::new(Vec::new()) }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbedding {
    async fn embed(&self, text: &str) -> Result<EmbeddingResponse, ProviderError> {
        self.inputs.lock().unwrap().push(text.to_string());
        match &self.vector {
            Ok(v) => Ok(EmbeddingResponse { embedding: v.clone() }),
            Err(status) => Err(ProviderError::Status { status: *status, body: "mock failure".to_string() }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchCall {
    pub query: String,
    pub vector: Vec<f32>,
    pub k: usize,
}

pub struct MockSearch {
    result: Result<Vec<SearchDocument>, (u16, String)>,
    calls: Mutex<Vec<SearchCall>>,
}

impl MockSearch {
    pub fn returning(docs: Vec<SearchDocument>) -> Self {
        Self { result: Ok(docs), calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self { result: Err((status, body.to_string())), calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for MockSearch {
    async fn search(
        &self,
        query: &str,
        vector: &[f32],
        k: usize
    ) -> Result<Vec<SearchDocument>, SearchError> {
        self.calls.lock().unwrap().push(SearchCall {
            query: query.to_string(),
            vector: vector.to_vec(),
            k,
        });
        match &self.result {
            Ok(docs) => Ok(docs.iter().take(k).cloned().collect()),
            Err((status, body)) => Err(SearchError::Status { status: *status, body: body.clone() }),
        }
    }
}
