//! Score Combiner & Calibrator: blends keyword and semantic scores into the displayed fit score.

use tracing::debug;

use super::policy::{BlendWeights, ScoringPolicy};

/// Keyword/semantic split, chosen by how many meaningful essentials the JD has and how
/// many the resume covers. Without a semantic score the keyword score carries everything.
pub fn blend_for(
    essential_total: usize,
    essential_ratio: f64,
    semantic_available: bool,
    policy: &ScoringPolicy,
) -> BlendWeights {
    if !semantic_available {
        return policy.blend_keyword_only;
    }
    match essential_total {
        0 => policy.blend_no_essentials,
        1 | 2 => policy.blend_few_essentials,
        _ if essential_ratio < 0.30 => policy.blend_very_low_coverage,
        _ if essential_ratio < 0.50 => policy.blend_low_coverage,
        _ => policy.blend_default,
    }
}

/// Scales the combined score down when the resume misses too many essentials.
pub fn apply_gap_penalty(
    combined: f64,
    essential_total: usize,
    essential_ratio: f64,
    policy: &ScoringPolicy,
) -> f64 {
    if essential_total < policy.penalty_min_essentials {
        return combined;
    }
    if essential_ratio < policy.severe_gap_ratio {
        policy.severe_gap_floor.max(combined * policy.severe_gap_factor)
    } else if essential_ratio < policy.major_gap_ratio {
        policy.major_gap_floor.max(combined * policy.major_gap_factor)
    } else if essential_ratio < policy.minor_gap_ratio {
        combined * policy.minor_gap_factor
    } else {
        combined
    }
}

/// `min(ceiling, round(max(floor, combined × scale + offset)))`.
pub fn calibrate(combined: f64, policy: &ScoringPolicy) -> u8 {
    let stretched = combined * policy.calibration_scale + policy.calibration_offset;
    let floor = f64::from(policy.fit_floor);
    let ceiling = f64::from(policy.fit_ceiling);
    stretched.max(floor).round().min(ceiling) as u8
}

/// Final fit score in `[fit_floor, fit_ceiling]`. Keyword-only scores are capped before
/// calibration so they land in the lower part of the band.
pub fn final_fit_score(
    keyword_score: f64,
    semantic_score: Option<f64>,
    essential_total: usize,
    essential_ratio: f64,
    policy: &ScoringPolicy,
) -> u8 {
    let blend = blend_for(essential_total, essential_ratio, semantic_score.is_some(), policy);
    let combined =
        keyword_score * blend.keyword + semantic_score.unwrap_or(0.0) * blend.semantic;
    let mut penalised = apply_gap_penalty(combined, essential_total, essential_ratio, policy);
    if semantic_score.is_none() {
        penalised = penalised.min(policy.keyword_only_combined_cap);
    }
    let fit = calibrate(penalised, policy);
    debug!(
        keyword = keyword_score,
        semantic = ?semantic_score,
        kw_weight = blend.keyword,
        sem_weight = blend.semantic,
        combined,
        penalised,
        fit,
        "Combined fit score"
    );
    fit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_selection() {
        let p = ScoringPolicy::default();
        assert_eq!(blend_for(0, 1.0, true, &p), p.blend_no_essentials);
        assert_eq!(blend_for(2, 0.0, true, &p), p.blend_few_essentials);
        assert_eq!(blend_for(5, 0.2, true, &p), p.blend_very_low_coverage);
        assert_eq!(blend_for(5, 0.4, true, &p), p.blend_low_coverage);
        assert_eq!(blend_for(5, 0.9, true, &p), p.blend_default);
        assert_eq!(blend_for(5, 0.9, false, &p), p.blend_keyword_only);
    }

    #[test]
    fn test_no_essentials_lets_semantic_dominate() {
        let p = ScoringPolicy::default();
        let w = blend_for(0, 1.0, true, &p);
        assert_eq!((w.keyword, w.semantic), (0.35, 0.65));
    }

    #[test]
    fn test_gap_penalty_ladder() {
        let p = ScoringPolicy::default();
        assert_eq!(apply_gap_penalty(20.0, 4, 0.0, &p), 25.0, "severe gap has a floor");
        assert!((apply_gap_penalty(80.0, 4, 0.1, &p) - 64.0).abs() < 1e-9);
        assert!((apply_gap_penalty(80.0, 4, 0.4, &p) - 72.0).abs() < 1e-9);
        assert!((apply_gap_penalty(80.0, 4, 0.5, &p) - 76.0).abs() < 1e-9);
        assert_eq!(apply_gap_penalty(80.0, 4, 0.8, &p), 80.0);
        assert_eq!(apply_gap_penalty(80.0, 1, 0.0, &p), 80.0, "needs two essentials");
    }

    #[test]
    fn test_calibration_band() {
        let p = ScoringPolicy::default();
        assert_eq!(calibrate(0.0, &p), 50);
        assert_eq!(calibrate(20.0, &p), 53);
        assert_eq!(calibrate(50.0, &p), 95);
        assert_eq!(calibrate(100.0, &p), 98);
    }

    #[test]
    fn test_final_score_always_in_band() {
        let p = ScoringPolicy::default();
        for kw in [0.0, 12.5, 50.0, 99.0, 100.0] {
            for sem in [None, Some(0.0), Some(7.0), Some(64.0), Some(100.0)] {
                for (total, ratio) in [(0, 1.0), (1, 0.0), (3, 0.0), (6, 0.5), (6, 1.0)] {
                    let fit = final_fit_score(kw, sem, total, ratio, &p);
                    assert!((50..=98).contains(&fit), "Expected fit in [50, 98], got {fit}");
                }
            }
        }
    }

    #[test]
    fn test_keyword_only_result_is_damped() {
        let p = ScoringPolicy::default();
        let keyword_only = final_fit_score(100.0, None, 5, 1.0, &p);
        assert_eq!(keyword_only, 67, "Expected capped keyword-only fit, got {keyword_only}");
        let blended = final_fit_score(100.0, Some(80.0), 5, 1.0, &p);
        assert!(
            blended > keyword_only,
            "Expected blended {blended} above keyword-only {keyword_only}"
        );
        // Below the cap the keyword score still orders candidates.
        assert!(final_fit_score(10.0, None, 0, 1.0, &p) < final_fit_score(25.0, None, 0, 1.0, &p));
    }

    #[test]
    fn test_monotonic_in_keyword_score() {
        let p = ScoringPolicy::default();
        let low = final_fit_score(20.0, Some(60.0), 4, 0.75, &p);
        let high = final_fit_score(60.0, Some(60.0), 4, 0.75, &p);
        assert!(high >= low, "Expected {high} ≥ {low}");
    }
}
