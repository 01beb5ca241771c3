//! OpenAI-compatible embeddings client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Embedder;
use crate::errors::MatchError;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Embeds text through a `/embeddings` endpoint.
/// Retries on 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: String,
        dimension: usize,
    ) -> Result<Self, MatchError> {
        if api_key.trim().is_empty() {
            return Err(MatchError::Config("missing OpenAI API key".to_string()));
        }
        let mut headers = reqwest::header::HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| MatchError::Config("invalid OpenAI API key".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model,
            dimension,
        })
    }

    async fn request_once(&self, text: &str) -> Result<Vec<f32>, MatchError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: [text],
            dimensions: Some(self.dimension),
        };
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(MatchError::EmbeddingApi {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingResponse = response.json().await?;
        parsed
            .data
            .into_iter()
            .min_by_key(|entry| entry.index)
            .map(|entry| entry.embedding)
            .ok_or_else(|| MatchError::Embedding("endpoint returned no embeddings".to_string()))
    }
}

fn retry_backoff(attempt: u32) -> Duration {
    Duration::from_millis(500 * (1 << attempt.min(5)))
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, MatchError> {
        let mut attempt = 0;
        loop {
            match self.request_once(text).await {
                Ok(vector) => {
                    debug!(dimension = vector.len(), "embedding received");
                    return Ok(vector);
                }
                Err(e) if e.is_transient() && attempt + 1 < MAX_RETRIES => {
                    attempt += 1;
                    let delay = retry_backoff(attempt);
                    warn!(
                        "Embedding call attempt {} failed ({e}), retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_api_key() {
        let result = OpenAiEmbedder::new("  ", "https://api.openai.com/v1", "m".into(), 8);
        assert!(matches!(result, Err(MatchError::Config(_))));
    }

    #[test]
    fn test_endpoint_is_joined_without_double_slash() {
        let e = OpenAiEmbedder::new("sk-test", "http://localhost:8080/v1/", "m".into(), 8).unwrap();
        assert_eq!(e.endpoint, "http://localhost:8080/v1/embeddings");
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        assert_eq!(retry_backoff(1), Duration::from_millis(1000));
        assert_eq!(retry_backoff(2), Duration::from_millis(2000));
        assert_eq!(retry_backoff(9), retry_backoff(5));
    }

    #[test]
    fn test_request_serialization() {
        let body = serde_json::to_value(EmbeddingRequest {
            model: "text-embedding-3-small",
            input: ["hello"],
            dimensions: None,
        })
        .unwrap();
        assert_eq!(body["input"][0], "hello");
        assert!(body.get("dimensions").is_none());
    }
}
