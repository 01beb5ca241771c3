use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Intermediate scores for one (JD, resume) pair, kept for transparency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    /// Boosted semantic score in [0, 100]; `None` when no embedding was usable.
    pub semantic_score_raw: Option<f64>,
    pub keyword_score_raw: f64,
    pub essential_match_ratio: f64,
    pub essential_matched_count: usize,
    pub essential_total_count: usize,
    pub final_fit_score: u8,
}

/// The externally visible output unit. Result lists are sorted by `jd_fit_score` desc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub jd_fit_score: u8,
    /// Placeholder drawn from a fit-score band, not an independent signal.
    pub interview_score: f64,
    /// Placeholder drawn from a fit-score band, not an independent signal.
    pub communication_score: u8,
    pub red_flags: Vec<String>,
    pub experience_summary: String,
    pub original_filename: String,
    pub scores: ScoreBundle,
    pub evaluated_at: DateTime<Utc>,
}
