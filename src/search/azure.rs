use async_trait::async_trait;
use log::debug;
use reqwest::{ header::{ HeaderMap, HeaderValue, CONTENT_TYPE }, Client as HttpClient };
use serde::{ Deserialize, Serialize };
use url::Url;

use super::{ SearchClient, SearchDocument, SearchError };
use crate::config::SearchSettings;

pub struct AzureSearchClient {
    http: HttpClient,
    url: Url,
    select: String,
    vector_field: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    top: usize,
    select: &'a str,
    vector_queries: [VectorQuery<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: &'a [f32],
    k: usize,
    fields: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    value: Vec<SearchDocument>,
}

impl AzureSearchClient {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(&settings.api_key)
            .map_err(|e| SearchError::Config(format!("Invalid search key format: {}", e)))?;
        key.set_sensitive(true);
        headers.insert("api-key", key);

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        let mut url = settings.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::Config(format!("'{}' cannot be a base URL", settings.endpoint)))?
            .pop_if_empty()
            .push("indexes")
            .push(&settings.index_name)
            .push("docs")
            .push("search");
        url.query_pairs_mut().clear().append_pair("api-version", &settings.api_version);

        Ok(Self {
            http,
            url,
            select: format!("{},{}", settings.title_field, settings.content_field),
            vector_field: settings.vector_field.clone(),
        })
    }
}

#[async_trait]
impl SearchClient for AzureSearchClient {
    async fn search(
        &self,
        query: &str,
        vector: &[f32],
        k: usize
    ) -> Result<Vec<SearchDocument>, SearchError> {
        let body = SearchRequest {
            top: k,
            select: &self.select,
            vector_queries: [VectorQuery {
                kind: "vector",
                vector,
                k,
                fields: &self.vector_field,
            }],
            search: Some(query).filter(|q| !q.is_empty()),
        };
        debug!("Searching {} (k={}, hybrid={})", self.url.path(), k, body.search.is_some());

        let resp = self.http.post(self.url.clone()).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SearchError::Status { status: status.as_u16(), body: text });
        }

        let parsed: SearchResponse = serde_json::from_str(&text)
            .map_err(|e| SearchError::Decode(format!("{} | {}", e, text)))?;
        Ok(parsed.value)
    }
}
