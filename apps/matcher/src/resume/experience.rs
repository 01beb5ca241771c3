//! Experience Extractor: years of experience stated in a resume.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nlp::lexicon::{is_domain_stopword, mentions_tech_term};

/// Characters a skill phrase may contain ("node.js", "ci/cd", "c++", "r&d").
const SKILL_CHARS: &str = r"[\w \-+#./&']";
const YEARS: &str = r"\d+(?:\.\d+)?";

static OVERALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<years>{YEARS})\+?[ \t]*(?:year|yr)s?[ \t]*(?:of)?[ \t]*(?:total|overall|professional|work(?:ing)?)?[ \t]*experience"
    ))
    .unwrap()
});

/// "X to Y years of SKILL", "X+ years of SKILL", "SKILL: X years".
static SKILL_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(&format!(
            r"{YEARS}[ \t]*(?:to|-)[ \t]*(?P<years>{YEARS})[ \t]*(?:year|yr)s?[ \t]*(?:of|in|as)?[ \t]+(?P<skill>{SKILL_CHARS}{{3,50}})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?P<years>{YEARS})\+?[ \t]*(?:year|yr)s?[ \t]*(?:of|in|as)?[ \t]+(?P<skill>{SKILL_CHARS}{{3,50}})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?P<skill>{SKILL_CHARS}{{3,50}})(?:[ \t]*[:\-(,][ \t]*|[ \t]+with[ \t]+)(?P<years>{YEARS})\+?[ \t]*(?:year|yr)s?"
        ))
        .unwrap(),
    ]
});

static SKILL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:experience|with|in|as|using|knowledge|proficiency|development|engineering|management|background|working|fluent|strong|solid|deep|hands-on|demonstrated|proven|ability|understanding|familiarity|degree|certification)\s+(?:in|of|with|on|using|for|around|related\s+to)?",
    )
    .unwrap()
});
static SKILL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\s+(?:experience|development|engineering|programming|management|background|skills|ability|required|preferred|essential|desired|tools|technologies|platforms|systems|frameworks|libraries|techniques|methods|principles|concepts)$",
    )
    .unwrap()
});
static EDGE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.,;:()\s]+|[.,;:()\s]+$").unwrap());

/// Words that make a captured phrase a duration rather than a skill.
const DURATION_WORDS: &[&str] = &["year", "years", "month", "months", "total", "overall", "experience"];

/// Upper bound (exclusive) for a believable years figure.
const MAX_YEARS: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceProfile {
    /// "N years of total/overall/professional experience".
    pub overall_years: Option<f64>,
    /// Skill phrase → the largest years value stated for it.
    pub per_skill: BTreeMap<String, f64>,
}

impl ExperienceProfile {
    pub fn is_empty(&self) -> bool {
        self.overall_years.is_none() && self.per_skill.is_empty()
    }

    /// Skills with the most years, gazetteer terms preferred when any are present.
    pub fn top_skills(&self, n: usize) -> Vec<(&str, f64)> {
        let tech: Vec<(&str, f64)> = self
            .per_skill
            .iter()
            .filter(|(skill, _)| mentions_tech_term(skill))
            .map(|(skill, years)| (skill.as_str(), *years))
            .collect();
        let mut pool = if tech.is_empty() {
            self.per_skill
                .iter()
                .map(|(skill, years)| (skill.as_str(), *years))
                .collect()
        } else {
            tech
        };
        pool.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pool.truncate(n);
        pool
    }
}

fn plausible_years(value: f64) -> bool {
    value > 0.0 && value < MAX_YEARS
}

fn parse_years(caps: &Captures) -> Option<f64> {
    caps.name("years")?.as_str().parse::<f64>().ok().filter(|y| plausible_years(*y))
}

/// Reduces a captured phrase to the skill it names, or `None` when nothing skill-like remains.
fn clean_skill(raw: &str) -> Option<String> {
    // Only the last sentence fragment can be the skill ("...experience. python: 5 years").
    let fragment = raw.rsplit(". ").next().unwrap_or(raw).trim();
    let skill = SKILL_PREFIX.replace(fragment, "");
    let skill = SKILL_SUFFIX.replace(skill.trim(), "");
    let skill = EDGE_PUNCT.replace_all(skill.trim(), "").to_string();

    let len = skill.chars().count();
    let numeric = skill.chars().all(|c| c.is_ascii_digit());
    let has_duration_word = skill.split_whitespace().any(|w| DURATION_WORDS.contains(&w));
    if len <= 2 || len >= 50 || numeric || is_domain_stopword(&skill) || has_duration_word {
        return None;
    }
    Some(skill)
}

/// Scans resume text for stated years of experience, overall and per skill.
pub fn extract_experience(text: &str) -> ExperienceProfile {
    let mut profile = ExperienceProfile::default();
    if text.trim().is_empty() {
        return profile;
    }
    let lower = text.to_lowercase();

    profile.overall_years = OVERALL.captures(&lower).and_then(|caps| parse_years(&caps));

    for pattern in SKILL_PATTERNS.iter() {
        for caps in pattern.captures_iter(&lower) {
            let Some(years) = parse_years(&caps) else {
                continue;
            };
            let Some(skill) = caps.name("skill").and_then(|m| clean_skill(m.as_str())) else {
                continue;
            };
            let entry = profile.per_skill.entry(skill).or_insert(0.0);
            *entry = entry.max(years);
        }
    }

    if !profile.is_empty() {
        debug!(overall = ?profile.overall_years, skills = ?profile.per_skill, "Extracted years of experience");
    }
    profile
}
