pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod models;
pub mod rag;
pub mod search;
pub mod server;
pub mod session;

#[cfg(test)]
mod testing;

use agent::ChatOrchestrator;
use cli::Args;
use config::Settings;
use history::initialize_session_store;
use log::{ info, warn };
use server::api::AppState;
use server::Server;
use session::SessionManager;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let settings = Settings::from_args(&args)?;

    info!("--- Core Configuration ---");
    info!("Server Address: {}", settings.server_addr);
    info!("Retrieval Mode: {}", settings.retrieval_mode);
    info!("Model Endpoint: {}", settings.model.endpoint);
    info!("Chat Deployment: {}", settings.model.chat_deployment);
    info!("Embedding Deployment: {}", settings.model.embedding_deployment);
    info!("Search Endpoint: {}", settings.search.endpoint);
    info!("Search Index: {}", settings.search.index_name);
    info!("Search Top K: {}", settings.search.top_k);
    info!("Session Store: {}", settings.session.store);
    info!("TLS Enabled: {}", settings.tls.is_some());
    info!("-------------------------");

    if settings.session.uses_insecure_secret() {
        warn!("SESSION_SECRET is the built-in development default. Set a real secret before deploying.");
    }

    let orchestrator = Arc::new(ChatOrchestrator::from_settings(&settings)?);
    let store = initialize_session_store(&settings.session)?;
    let sessions = SessionManager::new(store, &settings.session.secret, settings.session.ttl);

    let state = AppState { orchestrator, sessions };
    let server = Server::new(settings.server_addr.clone(), state, settings.tls.clone());
    server.run().await?;

    Ok(())
}
