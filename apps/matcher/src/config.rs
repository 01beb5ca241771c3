use anyhow::{bail, Context, Result};

/// Which embedding backend to load at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedderKind {
    Hash,
    OpenAi,
    Disabled,
}

/// Which linguistic analyzer to load at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    Rules,
    Disabled,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedder: EmbedderKind,
    pub embedding_dimension: usize,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_embedding_model: String,
    pub analyzer: AnalyzerKind,
    pub max_parallel: usize,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedder: EmbedderKind::Hash,
            embedding_dimension: 384,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_embedding_model: "text-embedding-3-small".to_string(),
            analyzer: AnalyzerKind::Rules,
            max_parallel: 4,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let embedder = parse_embedder(&optional_env("MATCHER_EMBEDDER").unwrap_or_default())?;

        let openai_api_key = optional_env("OPENAI_API_KEY");
        if embedder == EmbedderKind::OpenAi && openai_api_key.is_none() {
            // Surface the same message require_env would give.
            require_env("OPENAI_API_KEY")?;
        }

        Ok(Config {
            embedder,
            embedding_dimension: optional_env("MATCHER_EMBEDDING_DIMENSION")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MATCHER_EMBEDDING_DIMENSION must be a positive integer")?
                .unwrap_or(defaults.embedding_dimension),
            openai_api_key,
            openai_base_url: optional_env("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_embedding_model: optional_env("OPENAI_EMBEDDING_MODEL")
                .unwrap_or(defaults.openai_embedding_model),
            analyzer: parse_analyzer(&optional_env("MATCHER_ANALYZER").unwrap_or_default())?,
            max_parallel: optional_env("MATCHER_MAX_PARALLEL")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MATCHER_MAX_PARALLEL must be a positive integer")?
                .unwrap_or(defaults.max_parallel)
                .max(1),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_embedder(value: &str) -> Result<EmbedderKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "hash" => Ok(EmbedderKind::Hash),
        "openai" => Ok(EmbedderKind::OpenAi),
        "none" | "off" => Ok(EmbedderKind::Disabled),
        other => bail!("MATCHER_EMBEDDER must be one of hash|openai|none, got '{other}'"),
    }
}

fn parse_analyzer(value: &str) -> Result<AnalyzerKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "rules" => Ok(AnalyzerKind::Rules),
        "none" | "off" => Ok(AnalyzerKind::Disabled),
        other => bail!("MATCHER_ANALYZER must be one of rules|none, got '{other}'"),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
