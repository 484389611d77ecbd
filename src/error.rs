use axum::{ http::StatusCode, response::{ IntoResponse, Response }, Json };
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::history::SessionError;
use crate::llm::ProviderError;
use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    SearchService(#[from] SearchError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(_) | AppError::SearchService(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
