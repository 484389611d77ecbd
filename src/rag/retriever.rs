use log::info;
use std::sync::Arc;

use super::context::{ build_context, ContextFields };
use crate::error::AppError;
use crate::llm::embedding::EmbeddingClient;
use crate::search::SearchClient;

/// Embed → search → assemble, in that order, with no retries.
#[derive(Clone)]
pub struct Retriever {
    embedding_client: Arc<dyn EmbeddingClient>,
    search_client: Arc<dyn SearchClient>,
    fields: ContextFields,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        embedding_client: Arc<dyn EmbeddingClient>,
        search_client: Arc<dyn SearchClient>,
        fields: ContextFields,
        top_k: usize
    ) -> Self {
        Self { embedding_client, search_client, fields, top_k }
    }

    /// Returns the context block for `query`; empty when nothing was found.
    pub async fn retrieve_context(&self, query: &str) -> Result<String, AppError> {
        let vector = self.embedding_client.embed(query).await?.embedding;
        let docs = self.search_client.search(query, &vector, self.top_k).await?;
        let context = build_context(&docs, &self.fields);
        info!(
            "Retrieved {} document(s), {} context chars (dim={}, k={})",
            docs.len(),
            context.len(),
            vector.len(),
            self.top_k
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ doc, MockEmbedding, MockSearch };

    #[tokio::test]
    async fn passes_query_vector_and_top_k_to_search() {
        let embedding = Arc::new(MockEmbedding::returning(vec![0.1, 0.2]));
        let search = Arc::new(MockSearch::returning(vec![doc("Paris", "Eiffel tower.")]));
        let retriever = Retriever::new(embedding.clone(), search.clone(), ContextFields::default(), 5);

        let context = retriever.retrieve_context("what to see in Paris").await.unwrap();
        assert_eq!(context, "[1] Paris\nEiffel tower.");

        assert_eq!(embedding.inputs(), vec!["what to see in Paris".to_string()]);
        let calls = search.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query, "what to see in Paris");
        assert_eq!(calls[0].vector, vec![0.1, 0.2]);
        assert_eq!(calls[0].k, 5);
    }

    #[tokio::test]
    async fn embedding_failure_skips_search() {
        let embedding = Arc::new(MockEmbedding::failing(500));
        let search = Arc::new(MockSearch::returning(Vec::new()));
        let retriever = Retriever::new(embedding, search.clone(), ContextFields::default(), 5);

        let err = retriever.retrieve_context("q").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn search_failure_is_reported() {
        let embedding = Arc::new(MockEmbedding::returning(vec![1.0]));
        let search = Arc::new(MockSearch::failing(503, "Service Unavailable"));
        let retriever = Retriever::new(embedding, search, ContextFields::default(), 5);

        let err = retriever.retrieve_context("q").await.unwrap_err();
        assert!(matches!(err, AppError::SearchService(_)));
    }
}
