pub mod chat;
pub mod embedding;

use reqwest::{ header::{ HeaderMap, HeaderValue, CONTENT_TYPE }, Client as HttpClient, Response };
use thiserror::Error;
use url::Url;

use crate::config::ModelSettings;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("model provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model provider returned {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },
    #[error("model provider returned no {0}")]
    EmptyResponse(&'static str),
    #[error("invalid model provider configuration: {0}")]
    Config(String),
}

/// Authenticated handle to the hosted model service. Cheap to clone; the
/// underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ModelClient {
    http: HttpClient,
    endpoint: Url,
    api_version: String,
}

impl ModelClient {
    /// Builds the handle without touching the network. Bad credentials only
    /// show up on the first call.
    pub fn new(settings: &ModelSettings) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&settings.api_key)
            .map_err(|e| ProviderError::Config(format!("Invalid API key format: {}", e)))?;
        key.set_sensitive(true);
        headers.insert("api-key", key);

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            api_version: settings.api_version.clone(),
        })
    }

    /// `{endpoint}/openai/deployments/{deployment}/{operation}?api-version=...`
    pub fn deployment_url(&self, deployment: &str, operation: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            // endpoint is validated as a base URL when settings are resolved
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty();
                segments.push("openai").push("deployments").push(deployment);
                for part in operation.split('/') {
                    segments.push(part);
                }
            }
        }
        url.query_pairs_mut().clear().append_pair("api-version", &self.api_version);
        url
    }

    pub(crate) async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B
    ) -> Result<Response, ProviderError> {
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status: status.as_u16(), body });
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::model_settings as settings;

    #[test]
    fn builds_deployment_urls() {
        let client = ModelClient::new(&settings("https://example.openai.azure.com/")).unwrap();
        let url = client.deployment_url("gpt-4o", "chat/completions");
        assert_eq!(
            url.as_str(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-12-01-preview"
        );
    }

    #[test]
    fn endpoint_without_trailing_slash() {
        let client = ModelClient::new(&settings("https://example.openai.azure.com")).unwrap();
        let url = client.deployment_url("embed", "embeddings");
        assert_eq!(url.path(), "/openai/deployments/embed/embeddings");
    }

    #[test]
    fn rejects_unprintable_key() {
        let mut s = settings("https://example.openai.azure.com");
        s.api_key = "bad\nkey".to_string();
        assert!(matches!(ModelClient::new(&s), Err(ProviderError::Config(_))));
    }
}
