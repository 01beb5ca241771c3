//! Embedding capability: text to fixed-length vectors.
//!
//! Default: `HashingEmbedder` (deterministic, offline).
//! Optional: `OpenAiEmbedder` for OpenAI-compatible endpoints.

pub mod hash;
pub mod openai;
pub mod similarity;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::MatchError;
use crate::text::{truncate_chars, MAX_EMBED_CHARS};

pub use hash::HashingEmbedder;
pub use openai::OpenAiEmbedder;
pub use similarity::cosine_similarity;

/// The embedding trait. Carried as `Arc<dyn Embedder>` in `Capabilities`.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Length of every vector this backend returns.
    fn dimension(&self) -> usize;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, MatchError>;
}

/// Embeds the first `MAX_EMBED_CHARS` characters of `text`.
///
/// Returns `None` for blank input, on backend failure, or when the vector does not have
/// the backend's declared dimension; failures are logged, never raised.
pub async fn embed_bounded(embedder: &dyn Embedder, text: &str, label: &str) -> Option<Vec<f32>> {
    if text.trim().is_empty() {
        return None;
    }
    match embedder.embed(truncate_chars(text, MAX_EMBED_CHARS)).await {
        Ok(vector) if vector.len() == embedder.dimension() && !vector.is_empty() => Some(vector),
        Ok(vector) => {
            warn!(
                "Embedder '{}' returned {} values for {label}, expected {}",
                embedder.name(),
                vector.len(),
                embedder.dimension()
            );
            None
        }
        Err(e) => {
            warn!("Embedding {label} with '{}' failed: {e}", embedder.name());
            None
        }
    }
}
