use std::time::Duration;

use url::Url;

use super::{ positive, required, with_default, ConfigError };
use crate::cli::{ Args, RetrievalMode, SessionStoreType };

pub const DEFAULT_MODEL_API_VERSION: &str = "2024-12-01-preview";
pub const DEFAULT_SEARCH_API_VERSION: &str = "2024-03-01-preview";
pub const DEFAULT_VECTOR_FIELD: &str = "contentVector";
pub const DEFAULT_CONTENT_FIELD: &str = "content";
pub const DEFAULT_TITLE_FIELD: &str = "title";
pub const INSECURE_SESSION_SECRET: &str = "dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub endpoint: Url,
    pub api_key: String,
    pub api_version: String,
    pub chat_deployment: String,
    pub embedding_deployment: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: Url,
    pub index_name: String,
    pub api_key: String,
    pub api_version: String,
    pub vector_field: String,
    pub content_field: String,
    pub title_field: String,
    pub top_k: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub store: SessionStoreType,
    pub redis_url: String,
    pub redis_prefix: String,
    pub ttl: Duration,
}

impl SessionSettings {
    pub fn uses_insecure_secret(&self) -> bool {
        self.secret == INSECURE_SESSION_SECRET
    }
}

#[derive(Debug, Clone)]
pub struct TlsSettings {
    pub cert_path: String,
    pub key_path: String,
}

/// Everything the service needs, resolved once before the server binds.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub retrieval_mode: RetrievalMode,
    pub system_message: String,
    pub model: ModelSettings,
    pub search: SearchSettings,
    pub session: SessionSettings,
    pub tls: Option<TlsSettings>,
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let model = ModelSettings {
            endpoint: parse_endpoint(&required(&args.open_ai_endpoint, "OPEN_AI_ENDPOINT")?, "OPEN_AI_ENDPOINT")?,
            api_key: required(&args.open_ai_key, "OPEN_AI_KEY")?,
            api_version: with_default(&args.open_ai_api_version, DEFAULT_MODEL_API_VERSION),
            chat_deployment: required(&args.chat_model, "CHAT_MODEL")?,
            embedding_deployment: required(&args.embedding_model, "EMBEDDING_MODEL")?,
            timeout: Duration::from_secs(positive(args.model_timeout_secs, "MODEL_TIMEOUT_SECS")?),
        };

        if args.search_top_k == 0 {
            return Err(ConfigError::Invalid {
                name: "SEARCH_TOP_K",
                reason: "must be at least 1".to_string(),
            });
        }

        let search = SearchSettings {
            endpoint: parse_endpoint(&required(&args.search_endpoint, "SEARCH_ENDPOINT")?, "SEARCH_ENDPOINT")?,
            index_name: required(&args.index_name, "INDEX_NAME")?,
            api_key: required(&args.search_key, "SEARCH_KEY")?,
            api_version: with_default(&args.search_api_version, DEFAULT_SEARCH_API_VERSION),
            vector_field: with_default(&args.search_vector_field, DEFAULT_VECTOR_FIELD),
            content_field: with_default(&args.search_content_field, DEFAULT_CONTENT_FIELD),
            title_field: with_default(&args.search_title_field, DEFAULT_TITLE_FIELD),
            top_k: args.search_top_k,
            timeout: Duration::from_secs(positive(args.search_timeout_secs, "SEARCH_TIMEOUT_SECS")?),
        };

        let session = SessionSettings {
            secret: with_default(
                &args.session_secret,
                &with_default(&args.flask_secret_key, INSECURE_SESSION_SECRET)
            ),
            store: args.session_store,
            redis_url: args.session_redis_url.clone(),
            redis_prefix: args.session_redis_prefix.clone(),
            ttl: Duration::from_secs(positive(args.session_ttl_secs, "SESSION_TTL_SECS")?),
        };

        let tls = if args.enable_tls {
            Some(TlsSettings {
                cert_path: required(&args.tls_cert_path, "TLS_CERT_PATH")?,
                key_path: required(&args.tls_key_path, "TLS_KEY_PATH")?,
            })
        } else {
            None
        };

        Ok(Self {
            server_addr: args.server_addr.clone(),
            retrieval_mode: args.retrieval_mode,
            system_message: args.system_message.clone(),
            model,
            search,
            session,
            tls,
        })
    }
}

fn parse_endpoint(raw: &str, name: &'static str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: format!("'{}' is not a valid URL: {}", raw, e),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("'{}' cannot be used as a base URL", raw),
        });
    }
    Ok(url)
}
