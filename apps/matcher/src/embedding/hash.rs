use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use siphasher::sip::SipHasher13;

use super::Embedder;
use crate::errors::MatchError;
use crate::nlp::lexicon::ENGLISH_STOPWORDS;

/// Fixed keys keep vectors stable across runs and Rust versions.
/// Changing them changes every embedding.
const HASH_SEED_K0: u64 = 0x0123_4567_89ab_cdef;
const HASH_SEED_K1: u64 = 0xfedc_ba98_7654_3210;

const UNIGRAM_WEIGHT: f32 = 1.0;
const BIGRAM_WEIGHT: f32 = 0.5;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9][a-z0-9+#.\-/]*").unwrap());

/// Feature-hashing bag-of-words embedder.
///
/// - no model download, no network
/// - unigrams (stopwords skipped) plus adjacent-word bigrams
/// - SipHash13 with fixed keys, sign hashing, L2 normalised
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let idx = self.hash_token(feature);
        let sign = if self.hash_token(&format!("{feature}_sign")) % 2 == 0 {
            1.0
        } else {
            -1.0
        };
        vector[idx] += sign * weight;
    }

    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = WORD
            .find_iter(&lower)
            .map(|m| m.as_str().trim_end_matches(['.', '-', '/']))
            .filter(|w| !w.is_empty())
            .collect();

        let mut vector = vec![0.0f32; self.dimension];
        for word in &words {
            if !ENGLISH_STOPWORDS.contains(*word) {
                self.add_feature(&mut vector, word, UNIGRAM_WEIGHT);
            }
        }
        for pair in words.windows(2) {
            self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, MatchError> {
        Ok(self.embed_sync(text))
    }
}
