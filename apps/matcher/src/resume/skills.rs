use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::jd::keywords::gazetteer_matches;
use crate::nlp::lexicon::{is_domain_stopword, is_tech_term};
use crate::nlp::{AnalyzedText, EntityLabel, LinguisticAnalyzer, PartOfSpeech};

pub const MAX_RESUME_SKILLS: usize = 300;

/// Skills shorter than three characters that are still kept.
const KNOWN_SHORT_SKILLS: &[&str] = &[
    "c", "r", "ai", "ml", "dl", "cv", "nlp", "ui", "ux", "qa", "bi", "db", "os", "k8s", "api",
];

static CHUNK_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:proficiency|experience|knowledge|expertise)\s+(?:in|of|with|on|using)\s+").unwrap()
});
static CHUNK_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+(?:tools|technologies|platforms|systems|frameworks|libraries)$").unwrap()
});

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

fn chunk_skills(analyzed: &AnalyzedText, out: &mut HashSet<String>) {
    for chunk in &analyzed.noun_chunks {
        let text = chunk.text.to_lowercase().trim().to_string();
        let len = text.chars().count();
        if !(3..50).contains(&len) || is_numeric(&text) {
            continue;
        }
        if analyzed.chunk_tokens(chunk).iter().all(|t| t.is_stop || t.is_punct) {
            continue;
        }
        let cleaned = CHUNK_PREFIX.replace(&text, "");
        let cleaned = CHUNK_SUFFIX.replace(&cleaned, "").trim().to_string();
        if cleaned.chars().count() > 2 && !is_domain_stopword(&cleaned) {
            out.insert(cleaned);
        }
    }
}

fn entity_skills(analyzed: &AnalyzedText, out: &mut HashSet<String>) {
    for entity in &analyzed.entities {
        let relevant = matches!(
            entity.label,
            EntityLabel::Org
                | EntityLabel::Product
                | EntityLabel::Language
                | EntityLabel::Norp
                | EntityLabel::Tech
        );
        let text = entity.text.to_lowercase().trim().to_string();
        if relevant && text.chars().count() > 2 && !is_domain_stopword(&text) && !is_numeric(&text) {
            out.insert(text);
        }
    }
}

/// Noun lemmas, plus "adjective noun" compounds such as "scalable microservices".
fn lemma_skills(analyzed: &AnalyzedText, out: &mut HashSet<String>) {
    for (i, token) in analyzed.tokens.iter().enumerate() {
        if !token.pos.is_nominal() || token.is_stop || token.is_punct {
            continue;
        }
        let lemma = token.lemma.as_str();
        if lemma.chars().count() <= 1 || is_domain_stopword(lemma) || is_numeric(lemma) {
            continue;
        }
        if is_tech_term(lemma) || lemma.chars().count() > 2 {
            out.insert(lemma.to_string());
        }
        if let Some(prev) = i.checked_sub(1).map(|p| &analyzed.tokens[p]) {
            if prev.pos == PartOfSpeech::Adjective && !prev.is_stop {
                let compound = format!("{} {lemma}", prev.lemma);
                if !is_domain_stopword(&compound) {
                    out.insert(compound);
                }
            }
        }
    }
}

/// Distinct lowercase skill phrases found in resume text, longest first, at most
/// `MAX_RESUME_SKILLS`. Without an analyzer only gazetteer terms are found.
pub fn extract_resume_skills(text: &str, analyzer: Option<&dyn LinguisticAnalyzer>) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut skills: HashSet<String> = HashSet::new();
    if let Some(analyzer) = analyzer {
        let analyzed = analyzer.analyze(text);
        chunk_skills(&analyzed, &mut skills);
        entity_skills(&analyzed, &mut skills);
        lemma_skills(&analyzed, &mut skills);
    }
    let lower = text.to_lowercase();
    skills.extend(gazetteer_matches(&lower).map(str::to_string));

    let mut sorted: Vec<String> = skills
        .into_iter()
        .filter(|s| {
            (s.chars().count() > 2 || KNOWN_SHORT_SKILLS.contains(&s.as_str()))
                && !is_numeric(s)
                && !is_domain_stopword(s)
        })
        .collect();
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    sorted.truncate(MAX_RESUME_SKILLS);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedAnalyzer;

    #[test]
    fn test_resume_skills_from_analysis_and_gazetteer() {
        let text = "Built scalable microservices in Go and Python on AWS.\n\
                    Experience with distributed systems and machine learning.";
        let skills = extract_resume_skills(text, Some(&RuleBasedAnalyzer));
        for expected in [
            "python",
            "aws",
            "microservices",
            "machine learning",
            "scalable microservices",
        ] {
            assert!(skills.contains(&expected.to_string()), "missing {expected} in {skills:?}");
        }
        assert!(!skills.contains(&"experience".to_string()));
    }

    #[test]
    fn test_sorted_longest_first_and_distinct() {
        let skills = extract_resume_skills("python, docker, python and kubernetes", None);
        assert_eq!(skills, vec!["kubernetes", "docker", "python"]);
    }

    #[test]
    fn test_short_skills_need_whitelist() {
        let skills = extract_resume_skills("ML and AI research with R", Some(&RuleBasedAnalyzer));
        assert!(skills.contains(&"ml".to_string()), "got {skills:?}");
        assert!(skills.contains(&"r".to_string()), "got {skills:?}");
    }

    #[test]
    fn test_cap_is_respected() {
        let text: String = (0..400).map(|i| format!("Widget{i:03}x ")).collect();
        let skills = extract_resume_skills(&text, Some(&RuleBasedAnalyzer));
        assert!(skills.len() <= MAX_RESUME_SKILLS);
    }
}
