//! Process-wide, read-only model handles.
//!
//! Loaded once at startup and passed explicitly to every entry point. Each handle is either
//! `Loaded` or `Unavailable`; callers branch on it and take a reduced-feature path when a
//! capability is missing.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AnalyzerKind, Config, EmbedderKind};
use crate::embedding::{Embedder, HashingEmbedder, OpenAiEmbedder};
use crate::nlp::{LinguisticAnalyzer, RuleBasedAnalyzer};

pub enum Capability<T: ?Sized> {
    Loaded(Arc<T>),
    Unavailable { reason: String },
}

impl<T: ?Sized> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Capability::Loaded(inner) => Some(inner.as_ref()),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Capability::Loaded(_))
    }
}

impl<T: ?Sized> Clone for Capability<T> {
    fn clone(&self) -> Self {
        match self {
            Capability::Loaded(inner) => Capability::Loaded(Arc::clone(inner)),
            Capability::Unavailable { reason } => Capability::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Loaded(_) => f.write_str("Loaded"),
            Capability::Unavailable { reason } => write!(f, "Unavailable({reason})"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub analyzer: Capability<dyn LinguisticAnalyzer>,
    pub embedder: Capability<dyn Embedder>,
}

impl Capabilities {
    /// Builds the handles described by `config`. Never fails: a backend that cannot be
    /// initialised is recorded as unavailable.
    pub fn load(config: &Config) -> Self {
        let analyzer: Capability<dyn LinguisticAnalyzer> = match config.analyzer {
            AnalyzerKind::Rules => Capability::Loaded(Arc::new(RuleBasedAnalyzer)),
            AnalyzerKind::Disabled => Capability::unavailable("disabled by MATCHER_ANALYZER"),
        };

        let embedder: Capability<dyn Embedder> = match config.embedder {
            EmbedderKind::Hash => {
                Capability::Loaded(Arc::new(HashingEmbedder::new(config.embedding_dimension)))
            }
            EmbedderKind::OpenAi => match OpenAiEmbedder::new(
                config.openai_api_key.as_deref().unwrap_or_default(),
                &config.openai_base_url,
                config.openai_embedding_model.clone(),
                config.embedding_dimension,
            ) {
                Ok(e) => Capability::Loaded(Arc::new(e)),
                Err(e) => {
                    warn!("OpenAI embedder unavailable: {e}. Semantic scoring disabled.");
                    Capability::unavailable(e.to_string())
                }
            },
            EmbedderKind::Disabled => Capability::unavailable("disabled by MATCHER_EMBEDDER"),
        };

        let caps = Self { analyzer, embedder };
        info!(analyzer = ?caps.analyzer, embedder = ?caps.embedder, "Capabilities loaded");
        caps
    }

    /// Rule-based analyzer plus hashing embedder; fully offline and deterministic.
    pub fn offline() -> Self {
        Self::load(&Config::default())
    }

    /// Both capabilities missing; exercises every fallback path.
    pub fn unavailable() -> Self {
        Self {
            analyzer: Capability::unavailable("not loaded"),
            embedder: Capability::unavailable("not loaded"),
        }
    }
}
