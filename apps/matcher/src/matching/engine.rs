//! Match Orchestrator: scores every parsed resume against one JD and ranks the results.
//!
//! Pure and synchronous: each candidate depends only on the JD and its own profile.

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use super::calibration::final_fit_score;
use super::keyword_score::{score_keywords, ResumeEvidence};
use super::narrative::{experience_summary, red_flags};
use super::policy::ScoringPolicy;
use super::semantic_score::semantic_score;
use crate::models::{CandidateProfile, JobDescription, MatchResult, ScoreBundle};
use crate::text::word_count;

const SHORT_RESUME_ROLE: &str = "Candidate (Processing Issue)";
const SHORT_RESUME_INTERVIEW_SCORE: f64 = 1.0;

/// Role label guessed from the JD text.
pub fn guess_role(jd_text: &str) -> &'static str {
    let lower = jd_text.to_lowercase();
    if lower.contains("product manager") {
        "Product Manager"
    } else if lower.contains("data scientist") {
        "Data Scientist"
    } else {
        "Software Engineer"
    }
}

/// Placeholder interview score (one decimal, ≤5.0) drawn from the fit-score band.
pub fn placeholder_interview_score(fit: u8, rng: &mut impl Rng) -> f64 {
    let (low, high) = match fit {
        70.. => (4.0, 4.9),
        55..=69 => (3.5, 4.5),
        40..=54 => (3.0, 3.9),
        _ => (2.5, 3.5),
    };
    let drawn: f64 = rng.gen_range(low..=high);
    ((drawn * 10.0).round() / 10.0).min(5.0)
}

/// Placeholder communication score drawn from the fit-score band.
pub fn placeholder_communication_score(fit: u8, rng: &mut impl Rng) -> u8 {
    match fit {
        70.. => rng.gen_range(7..=10),
        50..=69 => rng.gen_range(6..=9),
        _ => rng.gen_range(4..=7),
    }
}

fn short_resume_result(
    profile: &CandidateProfile,
    words: usize,
    policy: &ScoringPolicy,
    rng: &mut impl Rng,
) -> MatchResult {
    warn!(
        "Resume {} for '{}' is too short to analyse ({words} words)",
        profile.filename, profile.name
    );
    MatchResult {
        id: Uuid::new_v4(),
        name: profile.name.clone(),
        role: SHORT_RESUME_ROLE.to_string(),
        jd_fit_score: policy.short_resume_fit,
        interview_score: SHORT_RESUME_INTERVIEW_SCORE,
        communication_score: rng.gen_range(3..=5),
        red_flags: vec![
            format!("Brief Resume (~{words} words). May lack detail."),
            "Resume content too short, empty, or unreadable.".to_string(),
        ],
        experience_summary: "Could not process resume for detailed analysis.".to_string(),
        original_filename: profile.filename.clone(),
        scores: ScoreBundle {
            final_fit_score: policy.short_resume_fit,
            ..Default::default()
        },
        evaluated_at: Utc::now(),
    }
}

fn score_candidate(
    jd: &JobDescription,
    role: &str,
    profile: &CandidateProfile,
    policy: &ScoringPolicy,
    rng: &mut impl Rng,
) -> MatchResult {
    let words = word_count(&profile.parsed_text);
    if words < policy.min_resume_words {
        return short_resume_result(profile, words, policy, rng);
    }

    let evidence = ResumeEvidence::new(&profile.parsed_text, &profile.skills);
    let keywords = score_keywords(&jd.keywords, &evidence, policy);
    let semantic = semantic_score(&jd.embeddings, profile.embedding.as_deref(), policy);
    let fit = final_fit_score(
        keywords.score_percent,
        semantic,
        keywords.essential_total,
        keywords.essential_ratio,
        policy,
    );

    let flags = red_flags(fit, &profile.parsed_text, &keywords, semantic.is_some(), policy);
    let summary = experience_summary(fit, &profile.parsed_text, &keywords, policy);

    info!(
        "Scored '{}' ({}): fit {fit}%, semantic {:?}, keyword {:.1}, essentials {}/{}",
        profile.name,
        profile.filename,
        semantic.map(|s| (s * 10.0).round() / 10.0),
        keywords.score_percent,
        keywords.essential_matched,
        keywords.essential_total
    );

    MatchResult {
        id: Uuid::new_v4(),
        name: profile.name.clone(),
        role: role.to_string(),
        jd_fit_score: fit,
        interview_score: placeholder_interview_score(fit, rng),
        communication_score: placeholder_communication_score(fit, rng),
        red_flags: flags,
        experience_summary: summary,
        original_filename: profile.filename.clone(),
        scores: ScoreBundle {
            semantic_score_raw: semantic,
            keyword_score_raw: keywords.score_percent,
            essential_match_ratio: keywords.essential_ratio,
            essential_matched_count: keywords.essential_matched,
            essential_total_count: keywords.essential_total,
            final_fit_score: fit,
        },
        evaluated_at: Utc::now(),
    }
}

/// Scores each profile against `jd`. Sorted by fit score, highest first; ties keep input order.
pub fn match_candidates(
    jd: &JobDescription,
    profiles: &[CandidateProfile],
    policy: &ScoringPolicy,
) -> Vec<MatchResult> {
    if jd.embeddings.is_empty() {
        warn!("No JD embeddings available; candidates are scored on keywords only");
    }
    if jd.keywords.is_empty() {
        warn!("No JD keywords extracted from {}; keyword scores will be zero", jd.filename);
    }

    let role = guess_role(&jd.cleaned_text);
    let mut rng = rand::thread_rng();
    let mut results: Vec<MatchResult> = profiles
        .iter()
        .map(|profile| score_candidate(jd, role, profile, policy, &mut rng))
        .collect();
    results.sort_by(|a, b| b.jd_fit_score.cmp(&a.jd_fit_score));

    info!("Matched {} candidates against {}", results.len(), jd.filename);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::jd::parse_job_text;
    use crate::models::{EmbeddingKey, EmbeddingSet};
    use crate::nlp::RuleBasedAnalyzer;
    use crate::resume::extract_resume_skills;

    const JD: &str = "Senior Backend Engineer\n\
        Essential Skills: Python, AWS, Docker\n\
        Nice to Have: Kubernetes\n\
        Responsibilities:\n\
        Design and operate backend services for our payments platform.";

    fn profile(name: &str, text: &str, embedding: Option<Vec<f32>>) -> CandidateProfile {
        CandidateProfile {
            name: name.to_string(),
            filename: format!("{}.txt", name.to_lowercase()),
            parsed_text: text.to_string(),
            skills: extract_resume_skills(text, Some(&RuleBasedAnalyzer)),
            embedding,
        }
    }

    fn strong_resume() -> String {
        "Backend engineer with 7 years of professional experience.\n\
         Built payments services in Python on AWS, packaged with Docker and deployed to \
         Kubernetes clusters. Designed event driven pipelines, owned on-call rotations, \
         and mentored junior engineers across three product teams over several releases \
         while improving test coverage and deployment speed."
            .to_string()
    }

    fn weak_resume() -> String {
        "Head chef with a long career running busy restaurant kitchens.\n\
         Planned seasonal menus, trained line cooks, managed food costs and suppliers, \
         and kept every station spotless during long weekend services for many years \
         in several cities while winning two regional awards for pastry and bread \
         and hosting weekly tasting evenings."
            .to_string()
    }

    #[tokio::test]
    async fn test_ranking_and_bounds() {
        let jd = parse_job_text(JD, "jd.txt", &Capabilities::offline()).await;
        let profiles = vec![
            profile("Weak", &weak_resume(), None),
            profile("Brief", "Hi I am a cook", None),
            profile("Strong", &strong_resume(), None),
        ];
        let results = match_candidates(&jd, &profiles, &ScoringPolicy::default());

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Strong", "Weak", "Brief"]);
        for r in &results[..2] {
            assert!((50..=98).contains(&r.jd_fit_score), "Expected fit in [50, 98], got {}", r.jd_fit_score);
            assert_eq!(r.role, "Software Engineer");
        }
        assert!(results[0].jd_fit_score > results[1].jd_fit_score);
        let top = &results[0].scores;
        assert!(top.essential_total_count >= 3);
        assert_eq!(top.essential_matched_count, top.essential_total_count);
    }

    #[tokio::test]
    async fn test_brief_resume_is_flagged_not_ranked_high() {
        let jd = parse_job_text(JD, "jd.txt", &Capabilities::offline()).await;
        let results = match_candidates(
            &jd,
            &[profile("Cook", "Hi I am a cook", None)],
            &ScoringPolicy::default(),
        );
        let r = &results[0];
        assert_eq!(r.jd_fit_score, 10);
        assert_eq!(r.role, "Candidate (Processing Issue)");
        assert_eq!(r.interview_score, 1.0);
        assert!((3..=5).contains(&r.communication_score));
        assert!(
            r.red_flags.iter().any(|f| f.starts_with("Brief Resume")),
            "Expected a Brief Resume flag, got {:?}",
            r.red_flags
        );
    }

    #[test]
    fn test_no_essentials_favours_semantic_similarity() {
        let vector = vec![0.6, 0.8];
        let mut embeddings = EmbeddingSet::new();
        embeddings.insert(EmbeddingKey::FullText, vector.clone());
        let jd = JobDescription {
            filename: "jd.txt".into(),
            cleaned_text: "We are hiring".into(),
            embeddings,
            ..Default::default()
        };
        let results = match_candidates(
            &jd,
            &[profile("Strong", &strong_resume(), Some(vector))],
            &ScoringPolicy::default(),
        );
        let scores = &results[0].scores;
        assert_eq!(scores.essential_match_ratio, 1.0);
        assert_eq!(scores.essential_total_count, 0);
        assert_eq!(scores.semantic_score_raw, Some(100.0));
        // 0.65 × 100 × 1.4 + 25 clamps to the ceiling
        assert_eq!(scores.final_fit_score, 98);
        assert!(results[0].red_flags[0].starts_with("JD has few/no clearly defined"));
    }

    #[tokio::test]
    async fn test_missing_embedding_falls_back_to_keywords() {
        let jd = parse_job_text(JD, "jd.txt", &Capabilities::unavailable()).await;
        let results = match_candidates(
            &jd,
            &[profile("Strong", &strong_resume(), None)],
            &ScoringPolicy::default(),
        );
        let r = &results[0];
        assert_eq!(r.scores.semantic_score_raw, None);
        assert!(r
            .red_flags
            .contains(&"Semantic analysis unavailable; score is keyword-only and approximate.".to_string()));
    }

    #[test]
    fn test_role_guess() {
        assert_eq!(guess_role("Senior Product Manager, Payments"), "Product Manager");
        assert_eq!(guess_role("We need a data scientist"), "Data Scientist");
        assert_eq!(guess_role("Rust developer"), "Software Engineer");
    }

    #[test]
    fn test_placeholders_stay_in_band() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let high = placeholder_interview_score(80, &mut rng);
            assert!((4.0..=4.9).contains(&high), "got {high}");
            let low = placeholder_interview_score(20, &mut rng);
            assert!((2.5..=3.5).contains(&low), "got {low}");
            assert!((7..=10).contains(&placeholder_communication_score(90, &mut rng)));
            assert!((6..=9).contains(&placeholder_communication_score(60, &mut rng)));
            assert!((4..=7).contains(&placeholder_communication_score(10, &mut rng)));
        }
    }
}
