//! Narrative Generator: red flags and a short experience summary for each candidate.

use std::collections::HashSet;

use super::keyword_score::KeywordMatch;
use super::policy::ScoringPolicy;
use crate::resume::extract_experience;
use crate::text::{title_case, truncate_chars, word_count};

/// Resume lines starting with these are contact details or headers, never a profile quote.
const NON_PROFILE_PREFIXES: &[&str] = &[
    "contact", "email", "phone", "linkedin", "summary", "objective", "profile", "highlights",
    "key skills", "technical proficiencies",
];

/// Only the first lines of a resume are searched for a profile statement.
const PROFILE_LINE_WINDOW: usize = 10;
const MIN_PROFILE_LINE_CHARS: usize = 30;
const MAX_GAP_EXAMPLES: usize = 2;
const MAX_ALIGNMENT_EXAMPLES: usize = 3;

fn example_suffix(missing: &[String]) -> String {
    if missing.is_empty() {
        return String::new();
    }
    let examples: Vec<&str> = missing.iter().take(MAX_GAP_EXAMPLES).map(String::as_str).collect();
    format!(" (e.g., {})", examples.join(", "))
}

fn essential_gap_flag(matches: &KeywordMatch) -> Option<String> {
    let total = matches.essential_total;
    let missing = total - matches.essential_matched;
    let pct_missing = (1.0 - matches.essential_ratio) * 100.0;
    let examples = example_suffix(&matches.missing_essentials);

    if matches.essential_matched == 0 && total >= 3 {
        Some(format!("Critical: Missing all {total} key essential skills{examples}."))
    } else if pct_missing >= 70.0 && missing >= 3 {
        Some(format!(
            "High concern: ~{pct_missing:.0}% essential skills ({missing}/{total}) missing{examples}."
        ))
    } else if pct_missing >= 50.0 && missing >= 2 {
        Some(format!(
            "Potential gaps: ~{pct_missing:.0}% essential skills ({missing}/{total}) underrepresented{examples}."
        ))
    } else {
        None
    }
}

/// Short cautionary notes, de-duplicated in first-seen order, at most `max_red_flags`.
pub fn red_flags(
    fit_score: u8,
    resume_text: &str,
    matches: &KeywordMatch,
    semantic_available: bool,
    policy: &ScoringPolicy,
) -> Vec<String> {
    let mut flags = Vec::new();

    if fit_score < policy.critical_fit_below {
        flags.push(format!("Critically Low JD Fit ({fit_score}%). Major misalignment likely."));
    } else if fit_score < policy.low_fit_below {
        flags.push(format!("Low JD Fit ({fit_score}%). Review essential requirements carefully."));
    }

    let words = word_count(resume_text);
    if words < policy.min_resume_words {
        flags.push(format!("Brief Resume (~{words} words). May lack detail."));
    }

    if matches.essential_total > 0 {
        flags.extend(essential_gap_flag(matches));
    } else {
        flags.push(
            "JD has few/no clearly defined essential technical skills; matching relies more on general text."
                .to_string(),
        );
    }

    if !semantic_available {
        flags.push("Semantic analysis unavailable; score is keyword-only and approximate.".to_string());
    }

    if flags.is_empty() {
        let closing = if fit_score >= policy.strong_fit_at {
            "Strong automated alignment. Verify details manually."
        } else if fit_score >= policy.good_fit_at {
            "Good alignment. Manual review recommended."
        } else {
            "Review profile details for comprehensive assessment."
        };
        flags.push(closing.to_string());
    }

    let mut seen = HashSet::new();
    flags.retain(|flag| seen.insert(flag.clone()));
    flags.truncate(policy.max_red_flags);
    flags
}

fn alignment_sentence(matches: &KeywordMatch) -> Option<String> {
    if matches.essential_total == 0 {
        return None;
    }
    let mut matched: Vec<&str> = matches.matched_essentials.iter().map(String::as_str).collect();
    // Stable: equal lengths keep JD order.
    matched.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    matched.truncate(MAX_ALIGNMENT_EXAMPLES);

    if matched.is_empty() {
        let gaps: Vec<&str> = matches
            .missing_essentials
            .iter()
            .take(MAX_GAP_EXAMPLES)
            .map(String::as_str)
            .collect();
        Some(format!("May have gaps in essential skills like {}.", gaps.join(", ")))
    } else {
        Some(format!("Shows alignment with key JD requirements like {}.", matched.join(", ")))
    }
}

fn profile_sentence(resume_text: &str, policy: &ScoringPolicy) -> Option<String> {
    let statement = resume_text
        .lines()
        .take(PROFILE_LINE_WINDOW)
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            line.chars().count() > MIN_PROFILE_LINE_CHARS
                && !NON_PROFILE_PREFIXES.iter().any(|p| lower.starts_with(p))
        });

    match statement {
        Some(line) => Some(format!(
            "Profile states: \"{}...\".",
            truncate_chars(line, policy.max_quote_chars).trim()
        )),
        None if resume_text.chars().count() > 20 => Some(format!(
            "Overall profile: {}...",
            truncate_chars(resume_text, policy.max_quote_chars).trim().replace('\n', " ")
        )),
        None => None,
    }
}

fn experience_sentence(resume_text: &str) -> Option<String> {
    let profile = extract_experience(resume_text);
    if let Some(years) = profile.overall_years {
        return Some(format!("Indicated total experience: {years:.0} yrs."));
    }
    let parts: Vec<String> = profile
        .top_skills(2)
        .into_iter()
        .map(|(skill, years)| format!("{} ({years:.1} yrs)", title_case(skill)))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("Specific experience includes: {}.", parts.join(", ")))
    }
}

/// A few sentences on alignment, profile statement, stated experience and a caution note.
/// At most `max_summary_chars` characters, followed by "..." when cut.
pub fn experience_summary(
    fit_score: u8,
    resume_text: &str,
    matches: &KeywordMatch,
    policy: &ScoringPolicy,
) -> String {
    let mut points: Vec<String> = Vec::new();
    points.extend(alignment_sentence(matches));
    points.extend(profile_sentence(resume_text, policy));
    points.extend(experience_sentence(resume_text));

    if fit_score < policy.caution_fit_below {
        points.push("Lower fit score; requires careful manual review against all criteria.".to_string());
    } else if fit_score < policy.moderate_fit_below {
        points.push("Moderate fit; review for specific skill alignment and potential.".to_string());
    }

    let summary = points.join(" ");
    if summary.chars().count() > policy.max_summary_chars {
        format!("{}...", truncate_chars(&summary, policy.max_summary_chars))
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(matched: &[&str], missing: &[&str]) -> KeywordMatch {
        let total = matched.len() + missing.len();
        KeywordMatch {
            score_percent: 0.0,
            essential_ratio: if total == 0 { 1.0 } else { matched.len() as f64 / total as f64 },
            essential_matched: matched.len(),
            essential_total: total,
            matched_essentials: matched.iter().map(|s| s.to_string()).collect(),
            missing_essentials: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn long_resume() -> String {
        let mut text = "Senior backend engineer focused on distributed payment systems\n".to_string();
        text.push_str(&"worked on services and pipelines ".repeat(10));
        text
    }

    #[test]
    fn test_strong_fit_gets_closing_remark_only() {
        let flags = red_flags(
            90,
            &long_resume(),
            &matches(&["python", "aws", "docker"], &[]),
            true,
            &ScoringPolicy::default(),
        );
        assert_eq!(flags, vec!["Strong automated alignment. Verify details manually."]);
    }

    #[test]
    fn test_all_essentials_missing_is_critical() {
        let flags = red_flags(
            52,
            &long_resume(),
            &matches(&[], &["python", "aws", "docker"]),
            true,
            &ScoringPolicy::default(),
        );
        assert_eq!(
            flags,
            vec!["Critical: Missing all 3 key essential skills (e.g., python, aws)."]
        );
    }

    #[test]
    fn test_partial_gaps_report_percentage() {
        let flags = red_flags(
            60,
            &long_resume(),
            &matches(&["python"], &["aws", "docker", "terraform"]),
            true,
            &ScoringPolicy::default(),
        );
        assert_eq!(
            flags,
            vec!["High concern: ~75% essential skills (3/4) missing (e.g., aws, docker)."]
        );

        let flags = red_flags(
            60,
            &long_resume(),
            &matches(&["python", "go"], &["aws", "docker"]),
            true,
            &ScoringPolicy::default(),
        );
        assert_eq!(
            flags,
            vec!["Potential gaps: ~50% essential skills (2/4) underrepresented (e.g., aws, docker)."]
        );
    }

    #[test]
    fn test_brief_low_fit_and_degraded_flags_are_capped() {
        let flags = red_flags(20, "Hi I am a cook", &matches(&[], &[]), false, &ScoringPolicy::default());
        assert_eq!(flags.len(), 4);
        assert!(flags[0].starts_with("Critically Low JD Fit (20%)"));
        assert_eq!(flags[1], "Brief Resume (~5 words). May lack detail.");
        assert!(flags[2].starts_with("JD has few/no clearly defined"));
        assert!(flags[3].starts_with("Semantic analysis unavailable"));
    }

    #[test]
    fn test_summary_mentions_alignment_profile_and_years() {
        let text = "Jane Doe\n\
                    Backend engineer building data platforms for fintech companies\n\
                    8 years of professional experience with Python and AWS.";
        let summary = experience_summary(
            80,
            text,
            &matches(&["python", "aws", "kubernetes", "sql"], &["go"]),
            &ScoringPolicy::default(),
        );
        assert_eq!(
            summary,
            "Shows alignment with key JD requirements like kubernetes, python, aws. \
             Profile states: \"Backend engineer building data platforms for fintech companies...\". \
             Indicated total experience: 8 yrs."
        );
    }

    #[test]
    fn test_summary_gap_sentence_and_caution() {
        let text = "Python: 5 years\nDocker: 2 years";
        let summary = experience_summary(
            35,
            text,
            &matches(&[], &["kubernetes", "terraform", "aws"]),
            &ScoringPolicy::default(),
        );
        assert!(summary.starts_with("May have gaps in essential skills like kubernetes, terraform."));
        assert!(summary.contains("Overall profile: Python: 5 years Docker: 2 years..."), "got {summary}");
        assert!(summary.contains("Specific experience includes: Python (5.0 yrs), Docker (2.0 yrs)."));
        assert!(summary.ends_with("Lower fit score; requires careful manual review against all criteria."));
    }

    #[test]
    fn test_summary_is_truncated_with_ellipsis() {
        let text = format!("{}\n", "very long profile statement ".repeat(40));
        let long_keywords: Vec<String> = (0..3).map(|i| format!("{}{i}", "k".repeat(120))).collect();
        let matched: Vec<&str> = long_keywords.iter().map(String::as_str).collect();
        let summary =
            experience_summary(60, &text, &matches(&matched, &[]), &ScoringPolicy::default());
        assert_eq!(summary.chars().count(), 450 + 3);
        assert!(summary.ends_with("..."));
    }
}
