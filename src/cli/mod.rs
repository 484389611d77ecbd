use clap::{ Parser, ValueEnum };

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalMode {
    /// Let the model provider query the search index through its data-source extension.
    Delegated,
    /// Embed the query, search the index and inject the results ourselves.
    Explicit,
}

impl std::fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalMode::Delegated => write!(f, "delegated"),
            RetrievalMode::Explicit => write!(f, "explicit"),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStoreType {
    Memory,
    Redis,
}

impl std::fmt::Display for SessionStoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreType::Memory => write!(f, "memory"),
            SessionStoreType::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Host address and port for the HTTP server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:5000")]
    pub server_addr: String,

    /// How supporting documents are retrieved (explicit, delegated)
    #[arg(long, env = "RETRIEVAL_MODE", value_enum, default_value_t = RetrievalMode::Explicit)]
    pub retrieval_mode: RetrievalMode,

    /// Fixed system instruction that opens every conversation.
    #[arg(
        long,
        env = "SYSTEM_MESSAGE",
        default_value = "You are a travel assistant that provides information on travel services available from Margie's Travel."
    )]
    pub system_message: String,

    // --- Model Provider Args ---
    /// Model endpoint (e.g., https://my-resource.openai.azure.com)
    #[arg(long, env = "OPEN_AI_ENDPOINT")]
    pub open_ai_endpoint: Option<String>,

    /// API key for the model endpoint
    #[arg(long, env = "OPEN_AI_KEY", hide_env_values = true)]
    pub open_ai_key: Option<String>,

    /// API version sent with every model call
    #[arg(long, env = "OPEN_AI_API_VERSION")] // Defaults to "2024-12-01-preview"
    pub open_ai_api_version: Option<String>,

    /// Deployment name used for chat completion
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Deployment name used for query embeddings
    #[arg(long, env = "EMBEDDING_MODEL")]
    pub embedding_model: Option<String>,

    /// Timeout in seconds for completion and embedding calls
    #[arg(long, env = "MODEL_TIMEOUT_SECS", default_value = "60")]
    pub model_timeout_secs: u64,

    // --- Search Service Args ---
    /// Search service endpoint (e.g., https://my-search.search.windows.net)
    #[arg(long, env = "SEARCH_ENDPOINT")]
    pub search_endpoint: Option<String>,

    /// Search index holding the documents
    #[arg(long, env = "INDEX_NAME")]
    pub index_name: Option<String>,

    /// API key for the search service
    #[arg(long, env = "SEARCH_KEY", hide_env_values = true)]
    pub search_key: Option<String>,

    /// Search REST API version
    #[arg(long, env = "SEARCH_API_VERSION")] // Defaults to "2024-03-01-preview"
    pub search_api_version: Option<String>,

    /// Index field holding the document vectors
    #[arg(long, env = "SEARCH_VECTOR_FIELD")] // Defaults to "contentVector"
    pub search_vector_field: Option<String>,

    /// Index field holding the document text
    #[arg(long, env = "SEARCH_CONTENT_FIELD")] // Defaults to "content"
    pub search_content_field: Option<String>,

    /// Index field holding the document title
    #[arg(long, env = "SEARCH_TITLE_FIELD")] // Defaults to "title"
    pub search_title_field: Option<String>,

    /// Number of documents requested per search.
    #[arg(long, env = "SEARCH_TOP_K", default_value = "5")]
    pub search_top_k: usize,

    /// Timeout in seconds for search calls
    #[arg(long, env = "SEARCH_TIMEOUT_SECS", default_value = "30")]
    pub search_timeout_secs: u64,

    // --- Session Args ---
    /// Secret used to sign session cookies. The default is insecure and only meant for local use.
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)] // Defaults to FLASK_SECRET_KEY, then "dev-secret-change-me"
    pub session_secret: Option<String>,

    /// Legacy name for the session secret, read when SESSION_SECRET is unset.
    #[arg(long, env = "FLASK_SECRET_KEY", hide = true, hide_env_values = true)]
    pub flask_secret_key: Option<String>,

    /// Session store type (memory, redis)
    #[arg(long, env = "SESSION_STORE", value_enum, default_value_t = SessionStoreType::Memory)]
    pub session_store: SessionStoreType,

    /// Redis URL for the session store (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "SESSION_REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub session_redis_url: String,

    /// Prefix for Redis session keys.
    #[arg(long, env = "SESSION_REDIS_PREFIX", default_value = "session:")]
    pub session_redis_prefix: String,

    /// Session lifetime in seconds (Redis TTL and cookie Max-Age).
    #[arg(long, env = "SESSION_TTL_SECS", default_value = "86400")]
    pub session_ttl_secs: u64,

    // --- TLS Args ---
    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
