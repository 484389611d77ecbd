use serde::Serialize;

use crate::config::SearchSettings;

/// Provider-side retrieval source attached to a chat-completion request, so
/// the provider queries the index itself.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "parameters", rename_all = "snake_case")]
pub enum DataSource {
    AzureSearch(AzureSearchParameters),
}

#[derive(Debug, Clone, Serialize)]
pub struct AzureSearchParameters {
    pub endpoint: String,
    pub index_name: String,
    pub authentication: Authentication,
    pub query_type: &'static str,
    pub embedding_dependency: EmbeddingDependency,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Authentication {
    ApiKey {
        key: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmbeddingDependency {
    DeploymentName {
        deployment_name: String,
    },
}

impl DataSource {
    pub fn azure_search(search: &SearchSettings, embedding_deployment: &str) -> Self {
        DataSource::AzureSearch(AzureSearchParameters {
            endpoint: search.endpoint.as_str().trim_end_matches('/').to_string(),
            index_name: search.index_name.clone(),
            authentication: Authentication::ApiKey { key: search.api_key.clone() },
            query_type: "vector",
            embedding_dependency: EmbeddingDependency::DeploymentName {
                deployment_name: embedding_deployment.to_string(),
            },
        })
    }
}
