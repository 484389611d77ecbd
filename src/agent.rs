use log::{ info, warn };
use std::sync::Arc;

use crate::cli::RetrievalMode;
use crate::config::prompt::PromptConfig;
use crate::config::Settings;
use crate::error::AppError;
use crate::llm::chat::{ new_client as new_chat_client, ChatClient, ChatRequest };
use crate::llm::embedding::new_client as new_embedding_client;
use crate::llm::ModelClient;
use crate::models::chat::{ Conversation, Turn };
use crate::rag::{ ContextFields, DataSource, Retriever };
use crate::search::new_client as new_search_client;

/// Where supporting documents come from for a turn.
#[derive(Clone)]
pub enum Retrieval {
    /// The provider runs the search itself from the attached data source.
    Delegated(DataSource),
    /// We embed, search and inject the context before calling the model.
    Explicit(Retriever),
}

/// Runs one chat turn over an explicit history value. It never touches the
/// session store; callers persist what it returns.
#[derive(Clone)]
pub struct ChatOrchestrator {
    chat_client: Arc<dyn ChatClient>,
    retrieval: Retrieval,
    prompts: Arc<PromptConfig>,
}

impl ChatOrchestrator {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        retrieval: Retrieval,
        prompts: PromptConfig
    ) -> Self {
        Self { chat_client, retrieval, prompts: Arc::new(prompts) }
    }

    /// Builds the long-lived model and search handles once from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let model = ModelClient::new(&settings.model)?;
        let chat_client = new_chat_client(&model, &settings.model.chat_deployment);
        info!(
            "Chat client configured: Endpoint={}, Deployment={}, ApiVersion={}",
            settings.model.endpoint,
            settings.model.chat_deployment,
            settings.model.api_version
        );

        let retrieval = match settings.retrieval_mode {
            RetrievalMode::Delegated => {
                info!(
                    "Retrieval delegated to the provider: Index={}, EmbeddingDeployment={}",
                    settings.search.index_name,
                    settings.model.embedding_deployment
                );
                Retrieval::Delegated(
                    DataSource::azure_search(&settings.search, &settings.model.embedding_deployment)
                )
            }
            RetrievalMode::Explicit => {
                let embedding_client = new_embedding_client(&model, &settings.model.embedding_deployment);
                let search_client = new_search_client(&settings.search)?;
                info!(
                    "Explicit retrieval: Index={}, VectorField={}, TopK={}, EmbeddingDeployment={}",
                    settings.search.index_name,
                    settings.search.vector_field,
                    settings.search.top_k,
                    settings.model.embedding_deployment
                );
                Retrieval::Explicit(
                    Retriever::new(
                        embedding_client,
                        search_client,
                        ContextFields {
                            title: settings.search.title_field.clone(),
                            content: settings.search.content_field.clone(),
                        },
                        settings.search.top_k
                    )
                )
            }
        };

        Ok(Self::new(chat_client, retrieval, PromptConfig::new(settings.system_message.clone())))
    }

    pub fn system_turn(&self) -> Turn {
        self.prompts.system_turn()
    }

    /// A history holding only the fixed system instruction.
    pub fn fresh_history(&self) -> Conversation {
        Conversation::new(self.system_turn())
    }

    /// Runs a full turn and returns the history to persist: `history` plus
    /// exactly one user and one assistant turn. On any error nothing is
    /// returned, so the caller's stored history stays as it was.
    pub async fn process_message(
        &self,
        history: &Conversation,
        message: &str
    ) -> Result<(Conversation, String), AppError> {
        let user_text = message.trim();
        if user_text.is_empty() {
            return Err(AppError::Validation("message is required".to_string()));
        }

        let mut updated = history.clone();
        updated.push(Turn::user(user_text));

        let request = match &self.retrieval {
            Retrieval::Explicit(retriever) => {
                let context = retriever.retrieve_context(user_text).await?;
                if context.is_empty() {
                    ChatRequest::new(updated.messages().to_vec())
                } else {
                    ChatRequest::new(updated.with_context(self.prompts.context_turn(&context)))
                }
            }
            Retrieval::Delegated(source) => {
                ChatRequest::new(updated.messages().to_vec()).with_data_source(source.clone())
            }
        };

        let reply = self.chat_client.complete(&request).await?.response;
        if reply.is_empty() {
            warn!("Model {} returned an empty reply", self.chat_client.get_model());
        }

        updated.push(Turn::assistant(reply.clone()));
        Ok((updated, reply))
    }
}
