pub mod azure;

use async_trait::async_trait;
use serde_json::{ Map, Value };
use std::sync::Arc;
use thiserror::Error;

use self::azure::AzureSearchClient;
use crate::config::SearchSettings;

/// A raw document as returned by the search service.
pub type SearchDocument = Map<String, Value>;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search service returned {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },
    #[error("could not decode search response: {0}")]
    Decode(String),
    #[error("invalid search configuration: {0}")]
    Config(String),
}

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Vector search for `vector`, combined with keyword relevance on `query`
    /// unless `query` is empty. Returns at most `k` documents in service order.
    async fn search(
        &self,
        query: &str,
        vector: &[f32],
        k: usize
    ) -> Result<Vec<SearchDocument>, SearchError>;
}

pub fn new_client(settings: &SearchSettings) -> Result<Arc<dyn SearchClient>, SearchError> {
    Ok(Arc::new(AzureSearchClient::new(settings)?))
}
