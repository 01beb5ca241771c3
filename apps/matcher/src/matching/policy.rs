//! Every scoring constant in one place.
//!
//! The values are tuned by hand against reviewer judgement, not derived. Changing one
//! changes displayed scores, so each is documented next to its field.

use serde::{Deserialize, Serialize};

use crate::models::KeywordCategory;

/// Piecewise recalibration of a raw cosine similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityCurve {
    /// sim ≥ high_threshold → sim + (sim − high_threshold) × high_stretch
    pub high_threshold: f64,
    pub high_stretch: f64,
    /// mid_threshold ≤ sim < high_threshold → sim + (sim − mid_threshold) × mid_stretch
    pub mid_threshold: f64,
    pub mid_stretch: f64,
    /// sim < low_threshold → sim × low_damping
    pub low_threshold: f64,
    pub low_damping: f64,
}

/// One keyword/semantic split of the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub keyword: f64,
    pub semantic: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    // ── Keyword scorer ────────────────────────────────────────────────────
    /// Category weights: essentials dominate, general text barely counts.
    pub essential_weight: f64,
    pub desirable_weight: f64,
    pub general_weight: f64,
    /// Extra base weight per additional word in a keyword, rewarding specific phrases.
    pub multiword_bonus_per_word: f64,
    pub multiword_bonus_cap: f64,
    /// Minimum length coverage for a partial phrase match between JD keyword and resume skill.
    pub partial_match_coverage: f64,

    // ── Semantic scorer ───────────────────────────────────────────────────
    pub essential_section_weight: f64,
    pub skills_document_weight: f64,
    pub responsibilities_weight: f64,
    pub similarity_curve: SimilarityCurve,
    /// `min(100, score × boost_multiplier + boost_offset)`; offsets systematic underestimation.
    pub boost_multiplier: f64,
    pub boost_offset: f64,

    // ── Combiner ──────────────────────────────────────────────────────────
    /// ≥3 essentials and ratio < 0.30.
    pub blend_very_low_coverage: BlendWeights,
    /// ≥3 essentials and ratio < 0.50.
    pub blend_low_coverage: BlendWeights,
    /// ≥3 essentials otherwise.
    pub blend_default: BlendWeights,
    /// 1–2 essentials.
    pub blend_few_essentials: BlendWeights,
    /// No essentials: semantic similarity carries the decision.
    pub blend_no_essentials: BlendWeights,
    /// Used when no semantic score exists at all.
    pub blend_keyword_only: BlendWeights,
    /// Ceiling on the combined score when there is no semantic score, so a keyword-only
    /// result stays in the lower part of the band (30 calibrates to 67).
    pub keyword_only_combined_cap: f64,
    /// Penalty ladder, applied only with at least this many essentials.
    pub penalty_min_essentials: usize,
    pub severe_gap_ratio: f64,
    pub severe_gap_factor: f64,
    pub severe_gap_floor: f64,
    pub major_gap_ratio: f64,
    pub major_gap_factor: f64,
    pub major_gap_floor: f64,
    pub minor_gap_ratio: f64,
    pub minor_gap_factor: f64,
    /// `final = combined × calibration_scale + calibration_offset`, clamped to the band.
    /// Cosmetic: keeps displayed scores in a palatable band. Flagged for product review.
    pub calibration_scale: f64,
    pub calibration_offset: f64,
    pub fit_floor: u8,
    pub fit_ceiling: u8,

    // ── Narrative ─────────────────────────────────────────────────────────
    pub critical_fit_below: u8,
    pub low_fit_below: u8,
    pub min_resume_words: usize,
    pub strong_fit_at: u8,
    pub good_fit_at: u8,
    pub caution_fit_below: u8,
    pub moderate_fit_below: u8,
    pub max_red_flags: usize,
    pub max_summary_chars: usize,
    pub max_quote_chars: usize,
    /// Fit score reported for resumes too short to analyse.
    pub short_resume_fit: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            essential_weight: 6.0,
            desirable_weight: 2.5,
            general_weight: 1.2,
            multiword_bonus_per_word: 0.25,
            multiword_bonus_cap: 0.5,
            partial_match_coverage: 0.6,

            essential_section_weight: 0.40,
            skills_document_weight: 0.40,
            responsibilities_weight: 0.20,
            similarity_curve: SimilarityCurve {
                high_threshold: 0.60,
                high_stretch: 0.7,
                mid_threshold: 0.45,
                mid_stretch: 0.4,
                low_threshold: 0.30,
                low_damping: 0.9,
            },
            boost_multiplier: 1.05,
            boost_offset: 7.0,

            blend_very_low_coverage: BlendWeights { keyword: 0.65, semantic: 0.35 },
            blend_low_coverage: BlendWeights { keyword: 0.60, semantic: 0.40 },
            blend_default: BlendWeights { keyword: 0.55, semantic: 0.45 },
            blend_few_essentials: BlendWeights { keyword: 0.45, semantic: 0.55 },
            blend_no_essentials: BlendWeights { keyword: 0.35, semantic: 0.65 },
            blend_keyword_only: BlendWeights { keyword: 1.0, semantic: 0.0 },
            keyword_only_combined_cap: 30.0,
            penalty_min_essentials: 2,
            severe_gap_ratio: 0.25,
            severe_gap_factor: 0.80,
            severe_gap_floor: 25.0,
            major_gap_ratio: 0.45,
            major_gap_factor: 0.90,
            major_gap_floor: 35.0,
            minor_gap_ratio: 0.65,
            minor_gap_factor: 0.95,
            calibration_scale: 1.4,
            calibration_offset: 25.0,
            fit_floor: 50,
            fit_ceiling: 98,

            critical_fit_below: 30,
            low_fit_below: 50,
            min_resume_words: 40,
            strong_fit_at: 75,
            good_fit_at: 55,
            caution_fit_below: 40,
            moderate_fit_below: 55,
            max_red_flags: 4,
            max_summary_chars: 450,
            max_quote_chars: 150,
            short_resume_fit: 10,
        }
    }
}

impl ScoringPolicy {
    pub fn category_weight(&self, category: KeywordCategory) -> f64 {
        match category {
            KeywordCategory::Essential => self.essential_weight,
            KeywordCategory::Desirable => self.desirable_weight,
            KeywordCategory::General => self.general_weight,
        }
    }

    /// 1.0 + min((words − 1) × bonus, cap)
    pub fn base_weight(&self, keyword: &str) -> f64 {
        let words = keyword.split_whitespace().count().max(1) as f64;
        1.0 + ((words - 1.0) * self.multiword_bonus_per_word).min(self.multiword_bonus_cap)
    }
}
