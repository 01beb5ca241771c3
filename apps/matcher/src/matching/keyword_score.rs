//! Keyword Scorer: weighted share of JD keywords found in a resume.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::policy::ScoringPolicy;
use crate::models::{CategorizedKeywords, KeywordCategory};
use crate::nlp::lexicon::{is_domain_stopword, is_tech_term, mentions_tech_term};
use crate::text::contains_word;

const GENERIC_PHRASES: &[&str] = &[
    "job summary", "work experience", "responsibilities", "requirements", "qualifications",
    "company overview", "team environment", "project details", "candidate profile", "key duties",
    "essential functions", "job description", "role overview", "position summary",
    "communication skills", "problem solving skills", "interpersonal skills", "team player",
    "attention to detail", "time management", "organizational skills", "work independently",
    "fast paced environment", "dynamic environment", "full time", "part time", "contract role",
    "years of experience",
];

static ADJECTIVE_PLUS_SKILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:strong|good|excellent|proven|demonstrated|solid|deep|hands-on)\s+(?:skills|experience|ability|knowledge)$",
    )
    .unwrap()
});

/// Whether a JD keyword is specific enough to count towards the score at all.
pub fn is_meaningful_keyword(keyword: &str) -> bool {
    let kw = keyword.to_lowercase();
    if is_domain_stopword(&kw) {
        return false;
    }
    let len = kw.chars().count();
    if len < 3 && !is_tech_term(&kw) {
        return false;
    }
    if GENERIC_PHRASES.contains(&kw.as_str()) {
        debug!("Filtering '{kw}' as a generic non-skill phrase");
        return false;
    }
    if ADJECTIVE_PLUS_SKILL.is_match(&kw) && !mentions_tech_term(&kw) {
        debug!("Filtering '{kw}' as generic adjective + skill");
        return false;
    }
    true
}

/// Resume side of a comparison: lowercase text and skill set.
#[derive(Debug, Clone)]
pub struct ResumeEvidence<'a> {
    pub text_lower: String,
    pub skills: HashSet<&'a str>,
}

impl<'a> ResumeEvidence<'a> {
    pub fn new(text: &str, skills: &'a [String]) -> Self {
        Self {
            text_lower: text.to_lowercase(),
            skills: skills.iter().map(String::as_str).collect(),
        }
    }

    /// Literal skill, whole word in the text, or a sufficiently overlapping skill phrase.
    pub fn mentions(&self, keyword: &str, partial_coverage: f64) -> bool {
        let kw = keyword.to_lowercase();
        if self.skills.contains(kw.as_str()) {
            return true;
        }
        if contains_word(&self.text_lower, &kw) {
            return true;
        }
        let kw_len = kw.chars().count() as f64;
        if kw.contains(' ') {
            self.skills.iter().any(|skill| {
                let skill_len = skill.chars().count() as f64;
                (contains_word(&kw, skill) && skill_len >= (partial_coverage * kw_len).max(3.0))
                    || (contains_word(skill, &kw)
                        && kw_len >= (partial_coverage * skill_len).max(3.0))
            })
        } else {
            self.skills
                .iter()
                .any(|skill| skill.contains(' ') && skill.split_whitespace().any(|w| w == kw))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatch {
    /// Weighted share of meaningful JD keywords found, in [0, 100].
    pub score_percent: f64,
    /// matched / total meaningful essentials; 1.0 when the JD has none.
    pub essential_ratio: f64,
    pub essential_matched: usize,
    pub essential_total: usize,
    /// Meaningful essential keywords, in JD order.
    pub matched_essentials: Vec<String>,
    pub missing_essentials: Vec<String>,
}

/// Scores `resume` against every meaningful keyword of every tier.
pub fn score_keywords(
    keywords: &CategorizedKeywords,
    resume: &ResumeEvidence<'_>,
    policy: &ScoringPolicy,
) -> KeywordMatch {
    let mut result = KeywordMatch {
        essential_ratio: 1.0,
        ..Default::default()
    };
    if keywords.is_empty() {
        debug!("No JD keywords to score against");
        return result;
    }

    let mut total_possible = 0.0;
    let mut total_matched = 0.0;
    for category in KeywordCategory::ALL {
        let category_weight = policy.category_weight(category);
        for keyword in keywords.get(category) {
            if !is_meaningful_keyword(keyword) {
                continue;
            }
            let weight = category_weight * policy.base_weight(keyword);
            total_possible += weight;

            let matched = resume.mentions(keyword, policy.partial_match_coverage);
            if matched {
                total_matched += weight;
            }
            if category == KeywordCategory::Essential {
                if matched {
                    result.matched_essentials.push(keyword.clone());
                } else {
                    result.missing_essentials.push(keyword.clone());
                }
            }
        }
    }

    result.essential_matched = result.matched_essentials.len();
    result.essential_total = result.essential_matched + result.missing_essentials.len();
    if result.essential_total > 0 {
        result.essential_ratio = result.essential_matched as f64 / result.essential_total as f64;
    }
    if total_possible > 0.0 {
        result.score_percent = (total_matched / total_possible * 100.0).clamp(0.0, 100.0);
    }
    debug!(
        score = result.score_percent,
        essential_ratio = result.essential_ratio,
        matched = ?result.matched_essentials,
        "Keyword score"
    );
    result
}
