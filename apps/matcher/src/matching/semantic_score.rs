//! Semantic Scorer: weighted, recalibrated cosine similarity between JD sections and a resume.

use tracing::debug;

use super::policy::{ScoringPolicy, SimilarityCurve};
use crate::embedding::cosine_similarity;
use crate::models::{EmbeddingKey, EmbeddingSet};

/// Weights below this mean no weighted section was available.
const MIN_APPLIED_WEIGHT: f64 = 0.01;

/// Stretches high similarities upward and damps low ones.
pub fn recalibrate(similarity: f64, curve: &SimilarityCurve) -> f64 {
    if similarity >= curve.high_threshold {
        similarity + (similarity - curve.high_threshold) * curve.high_stretch
    } else if similarity >= curve.mid_threshold {
        similarity + (similarity - curve.mid_threshold) * curve.mid_stretch
    } else if similarity < curve.low_threshold {
        similarity * curve.low_damping
    } else {
        similarity
    }
}

/// Pre-boost semantic score in [0, 100].
///
/// Weighted over the sections that have a JD embedding, falling back to the full-text
/// embedding. `None` when the JD has no usable embedding at all.
pub fn weighted_similarity(
    jd_embeddings: &EmbeddingSet,
    resume_embedding: &[f32],
    policy: &ScoringPolicy,
) -> Option<f64> {
    let sections = [
        (EmbeddingKey::EssentialRequirements, policy.essential_section_weight),
        (EmbeddingKey::SkillsSemanticDocument, policy.skills_document_weight),
        (EmbeddingKey::Responsibilities, policy.responsibilities_weight),
    ];

    let mut weighted_sum = 0.0;
    let mut applied_weight = 0.0;
    for (key, weight) in sections {
        let Some(jd_vector) = jd_embeddings.get(&key) else {
            continue;
        };
        let similarity = f64::from(cosine_similarity(jd_vector, resume_embedding));
        let adjusted = recalibrate(similarity, &policy.similarity_curve).clamp(0.0, 1.0);
        debug!(section = ?key, raw = similarity, adjusted, weight, "Section similarity");
        weighted_sum += adjusted * weight;
        applied_weight += weight;
    }

    if applied_weight > MIN_APPLIED_WEIGHT {
        return Some(weighted_sum / applied_weight * 100.0);
    }
    let full_text = jd_embeddings.get(&EmbeddingKey::FullText)?;
    let similarity = f64::from(cosine_similarity(full_text, resume_embedding));
    debug!(raw = similarity, "Semantic similarity from full-text fallback");
    Some(similarity.clamp(0.0, 1.0) * 100.0)
}

/// `min(100, score × multiplier + offset)`.
pub fn boost(score: f64, policy: &ScoringPolicy) -> f64 {
    (score * policy.boost_multiplier + policy.boost_offset).min(100.0)
}

/// Boosted semantic score, or `None` when either side has no embedding.
pub fn semantic_score(
    jd_embeddings: &EmbeddingSet,
    resume_embedding: Option<&[f32]>,
    policy: &ScoringPolicy,
) -> Option<f64> {
    let resume_embedding = resume_embedding.filter(|v| !v.is_empty())?;
    weighted_similarity(jd_embeddings, resume_embedding, policy).map(|s| boost(s, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(values: &[f32]) -> Vec<f32> {
        let norm = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        values.iter().map(|v| v / norm).collect()
    }

    #[test]
    fn test_recalibration_curve() {
        let curve = ScoringPolicy::default().similarity_curve;
        assert!((recalibrate(0.8, &curve) - 0.94).abs() < 1e-9);
        assert!((recalibrate(0.5, &curve) - 0.52).abs() < 1e-9);
        assert!((recalibrate(0.35, &curve) - 0.35).abs() < 1e-9);
        assert!((recalibrate(0.2, &curve) - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_identical_vectors_score_hundred() {
        let v = unit(&[1.0, 2.0, 3.0]);
        let mut jd = EmbeddingSet::new();
        jd.insert(EmbeddingKey::EssentialRequirements, v.clone());
        jd.insert(EmbeddingKey::Responsibilities, v.clone());
        let raw = weighted_similarity(&jd, &v, &ScoringPolicy::default()).unwrap();
        assert!((raw - 100.0).abs() < 1e-3, "Expected 100, got {raw}");
        assert_eq!(semantic_score(&jd, Some(v.as_slice()), &ScoringPolicy::default()), Some(100.0));
    }

    #[test]
    fn test_full_text_fallback() {
        let v = unit(&[1.0, 0.0]);
        let mut jd = EmbeddingSet::new();
        jd.insert(EmbeddingKey::FullText, unit(&[1.0, 1.0]));
        let raw = weighted_similarity(&jd, &v, &ScoringPolicy::default()).unwrap();
        assert!((raw - 70.71).abs() < 0.01, "Expected ≈70.71, got {raw}");
    }

    #[test]
    fn test_opposite_vectors_clamp_to_zero_before_boost() {
        let mut jd = EmbeddingSet::new();
        jd.insert(EmbeddingKey::EssentialRequirements, vec![1.0, 0.0]);
        let raw = weighted_similarity(&jd, &[-1.0, 0.0], &ScoringPolicy::default()).unwrap();
        assert_eq!(raw, 0.0);
        assert_eq!(boost(raw, &ScoringPolicy::default()), 7.0);
    }

    #[test]
    fn test_missing_embeddings_give_none() {
        let policy = ScoringPolicy::default();
        assert_eq!(semantic_score(&EmbeddingSet::new(), Some(&[1.0f32][..]), &policy), None);
        let mut jd = EmbeddingSet::new();
        jd.insert(EmbeddingKey::FullText, vec![1.0]);
        assert_eq!(semantic_score(&jd, None, &policy), None);
    }
}
