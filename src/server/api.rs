use axum::{
    body::Bytes,
    extract::State,
    http::{ header::SET_COOKIE, HeaderMap, HeaderValue },
    response::{ Html, IntoResponse, Response },
    routing::{ get, post },
    Json,
    Router,
};
use log::{ error, info, warn };
use serde::{ Deserialize, Serialize };
use std::sync::Arc;
use tower_http::cors::{ Any, CorsLayer };

use crate::agent::ChatOrchestrator;
use crate::error::AppError;
use crate::models::chat::Conversation;
use crate::session::{ SessionContext, SessionManager };

const INDEX_HTML: &str = include_str!("../../templates/index.html");

#[derive(Deserialize, Default)]
struct ChatBody {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ChatReply {
    reply: String,
}

#[derive(Serialize)]
struct ResetReply {
    ok: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
    pub sessions: SessionManager,
}

impl AppState {
    async fn history(&self, session: &SessionContext) -> Result<Option<Conversation>, AppError> {
        Ok(self.sessions.load(session, self.orchestrator.system_turn()).await?)
    }

    fn with_cookie(&self, session: &SessionContext, mut response: Response) -> Response {
        if session.is_new {
            match HeaderValue::from_str(&self.sessions.cookie(session)) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => error!("Could not encode session cookie: {}", e),
            }
        }
        response
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/reset", post(reset_handler))
        .layer(cors)
        .with_state(state)
}

async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(&headers);
    if state.history(&session).await?.is_none() {
        state.sessions.save(&session, &state.orchestrator.fresh_history()).await?;
        info!("Started conversation for session {}", session.id);
    }
    Ok(state.with_cookie(&session, Html(INDEX_HTML).into_response()))
}

async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(&headers);
    // a missing or malformed body is handled like a blank message
    let body: ChatBody = serde_json::from_slice(&body).unwrap_or_default();
    if body.message.trim().is_empty() {
        warn!("Rejected chat request for session {}: message is required", session.id);
        return Err(AppError::Validation("message is required".to_string()));
    }

    let history = match state.history(&session).await? {
        Some(history) => history,
        None => state.orchestrator.fresh_history(),
    };

    info!("Chat turn for session {} ({} turns so far)", session.id, history.messages().len());
    let (updated, reply) = match state.orchestrator.process_message(&history, &body.message).await {
        Ok(result) => result,
        Err(AppError::Validation(msg)) => {
            warn!("Rejected chat request for session {}: {}", session.id, msg);
            return Err(AppError::Validation(msg));
        }
        Err(e) => {
            error!("Chat turn failed for session {}: {}", session.id, e);
            return Err(e);
        }
    };

    state.sessions.save(&session, &updated).await?;
    Ok(state.with_cookie(&session, Json(ChatReply { reply }).into_response()))
}

async fn reset_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = state.sessions.resolve(&headers);
    state.sessions.save(&session, &state.orchestrator.fresh_history()).await?;
    info!("Reset conversation for session {}", session.id);
    Ok(state.with_cookie(&session, Json(ResetReply { ok: true }).into_response()))
}
