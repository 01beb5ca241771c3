//! Keyword Extractor: candidate skill phrases from one JD section.
//!
//! Four sources are unioned: cleaned noun chunks, whitelisted entities, tech-shaped noun
//! lemmas and a whole-word gazetteer scan. The union is then filtered and de-duplicated by
//! subsumption so specific phrases ("spring boot") win over the words they contain ("spring").
//! Without a linguistic analyzer only the gazetteer scan runs.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::nlp::lexicon::{is_domain_stopword, is_tech_term, mentions_tech_term, TECH_TERMS};
use crate::nlp::{AnalyzedText, EntityLabel, LinguisticAnalyzer};
use crate::text::contains_word;

/// "experience in X", "track record in X", ...
static PREFIX_QUALIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:experience|proficiency|knowledge|expertise|background|understanding|familiarity|degree|certification|competency|skill\s+in|track\s+record\s+in|history\s+of|proven\s+ability\s+to|demonstrated\s+ability\s+in)\s+(?:in|of|with|on|using|for|around|related\s+to|working\s+with)\s+",
    )
    .unwrap()
});

/// "X skills", "X frameworks", ...
static SUFFIX_QUALIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\s+(?:experience|development|management|skills|ability|required|preferred|essential|desired|tools|technologies|platforms|systems|frameworks|libraries|techniques|methods|principles|concepts|competencies|proficiency|expertise|knowledge)$",
    )
    .unwrap()
});

static LEADING_MODIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:a|an|the|strong|good|excellent|proven|demonstrated|solid|deep|hands-on|some|any|various|multiple|related|ensure|provide|required|essential|preferred|desired|plus|bonus|minimum|key|core|basic|advanced|expert)\s+",
    )
    .unwrap()
});

static LIST_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*\u{2022}\s]+|[.,;:!?]$").unwrap());

/// Lowercase token that looks like a technology name: "k8s", "node.js", "c++".
static TECH_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9+#.-]+[a-z0-9]$").unwrap());

/// Endings that describe a kind of experience rather than a skill.
const DESCRIPTOR_SUFFIXES: &[&str] = &[
    " experience", " development", " management", " skills", " ability", " knowledge",
    " background", " understanding", " familiarity", " degree", " certification", " proficiency",
];

const LEVEL_WORDS: &[&str] = &[
    "strong", "good", "excellent", "proven", "demonstrated", "solid", "deep", "hands-on", "years",
    "year", "minimum", "required", "preferred", "plus",
];

const GENERIC_SINGLE_WORDS: &[&str] = &[
    "required", "preferred", "desired", "essential", "bonus", "plus", "strong", "good", "excellent",
    "proven", "solid", "minimum", "key", "core", "basic", "advanced", "expert",
];

pub const SHORT_ACRONYMS: &[&str] = &[
    "c", "r", "ai", "ml", "dl", "cv", "nlp", "ui", "ux", "qa", "bi", "iot", "erp", "crm", "devops",
    "sre",
];

const ORG_NOISE: &[&str] = &[
    "company", "client", "team", "group", "organization", "inc", "llc", "ltd", "corp",
    "corporation", "solutions", "systems", "services", "technologies", "university", "institute",
    "college", "department",
];

const ENTITY_NOISE_FRAGMENTS: &[&str] = &[
    " role", " team", " company", " client", " project", " summary", " description",
    " experience", " management",
];

/// Dropped from essential keywords: boilerplate rather than a requirement.
const ESSENTIAL_GENERIC_INDICATORS: &[&str] = &[
    "summary", "description", "requirement", "qualification", "responsibility", "duty", "role",
    "team", "project", "client", "customer", "solution", "communication", "problem solving",
    "skill", "years of experience", "overview", "candidate profile", "ideal candidate",
    "looking for a", "responsible for", "work environment", "company culture", "benefits package",
    "application process", "equal opportunity",
];

const ESSENTIAL_HEDGE_PREFIXES: &[&str] = &[
    "experience in", "knowledge of", "ability to", "understanding of", "familiarity with",
];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn word_len(s: &str) -> usize {
    s.split_whitespace().count()
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

/// Ordering used for every keyword list: more words, then longer, then lexical.
pub fn keyword_order(a: &str, b: &str) -> std::cmp::Ordering {
    word_len(b)
        .cmp(&word_len(a))
        .then_with(|| char_len(b).cmp(&char_len(a)))
        .then_with(|| a.cmp(b))
}

/// Strips experience-descriptor prefixes/suffixes, leading qualifiers and list markers.
///
/// `"experience in machine learning"` → `"machine learning"`, `"strong python skills"` → `"python"`.
pub fn clean_phrase(phrase: &str) -> String {
    let mut text = PREFIX_QUALIFIERS.replace(phrase, "").trim().to_string();
    text = SUFFIX_QUALIFIERS.replace(&text, "").trim().to_string();
    loop {
        let stripped = LEADING_MODIFIERS.replace(&text, "").trim().to_string();
        if stripped == text {
            break;
        }
        text = stripped;
    }
    LIST_MARKERS.replace_all(&text, "").trim().to_string()
}

/// `kw` occurs as a whole word inside `other`, and `other` is meaningfully more specific.
fn is_subsumed_by(kw: &str, other: &str, min_extra_chars: usize) -> bool {
    kw != other
        && contains_word(other, kw)
        && (char_len(other) > char_len(kw) + min_extra_chars || word_len(other) > word_len(kw))
}

fn noun_chunk_candidates(analyzed: &AnalyzedText, out: &mut HashSet<String>) {
    for chunk in &analyzed.noun_chunks {
        let text = chunk.text.to_lowercase().trim().to_string();
        let len = char_len(&text);
        if !(3..50).contains(&len) || is_numeric(&text) || is_domain_stopword(&text) {
            continue;
        }
        let tokens = analyzed.chunk_tokens(chunk);
        if tokens.iter().all(|t| t.is_stop || t.is_punct) {
            continue;
        }
        if word_len(&text) > 4 {
            let content_words = tokens.iter().filter(|t| !t.is_stop && !t.is_punct).count();
            if content_words < 2 && !mentions_tech_term(&text) {
                continue;
            }
        }
        if DESCRIPTOR_SUFFIXES.iter().any(|s| text.ends_with(s)) {
            let first = text.split_whitespace().next().unwrap_or_default();
            if is_domain_stopword(first) || LEVEL_WORDS.contains(&first) {
                continue;
            }
        }

        let cleaned = clean_phrase(&text);
        if cleaned != text {
            debug!(from = %text, to = %cleaned, "Cleaned noun chunk");
        }
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let len = char_len(&cleaned);
        if cleaned.is_empty() || is_domain_stopword(&cleaned) || !(2..50).contains(&len) || words.len() > 4 {
            continue;
        }
        if words.len() > 1 && words.iter().all(|w| is_domain_stopword(w)) {
            continue;
        }
        if words.len() == 1 && GENERIC_SINGLE_WORDS.contains(&cleaned.as_str()) {
            continue;
        }
        out.insert(cleaned);
    }
}

fn entity_candidates(analyzed: &AnalyzedText, out: &mut HashSet<String>) {
    for entity in &analyzed.entities {
        if !matches!(
            entity.label,
            EntityLabel::Product | EntityLabel::Tech | EntityLabel::Language | EntityLabel::Org
        ) {
            continue;
        }
        let text = entity.text.to_lowercase().trim().to_string();
        if is_domain_stopword(&text) || char_len(&text) <= 1 || word_len(&text) > 4 {
            continue;
        }
        if entity.label == EntityLabel::Org && ORG_NOISE.contains(&text.as_str()) {
            continue;
        }
        if ENTITY_NOISE_FRAGMENTS.iter().any(|f| text.contains(f)) {
            continue;
        }
        out.insert(text);
    }
}

fn lemma_candidates(analyzed: &AnalyzedText, out: &mut HashSet<String>) {
    for token in &analyzed.tokens {
        if !token.pos.is_nominal() || token.is_stop || token.is_punct {
            continue;
        }
        let lemma = token.lemma.trim();
        if lemma.is_empty() || is_domain_stopword(lemma) || word_len(lemma) > 3 {
            continue;
        }
        let len = char_len(lemma);
        let accepted = is_tech_term(lemma)
            || SHORT_ACRONYMS.contains(&lemma)
            || (len >= 2 && TECH_SHAPE.is_match(lemma) && !is_numeric(lemma))
            || (token.is_upper && (2..=5).contains(&len));
        if accepted {
            out.insert(lemma.to_string());
        }
    }
}

/// Every gazetteer term that occurs as a whole word in `lower_text`.
pub fn gazetteer_matches(lower_text: &str) -> impl Iterator<Item = &'static str> + '_ {
    TECH_TERMS
        .iter()
        .copied()
        .filter(move |term| contains_word(lower_text, term))
}

/// Extracts keyword phrases (lowercase, 1–4 words) from one section.
///
/// `is_essential` enables the stricter filtering used for essential requirements. The
/// result is ordered by [`keyword_order`] and is identical for identical input.
pub fn extract_keywords(
    text: &str,
    is_essential: bool,
    analyzer: Option<&dyn LinguisticAnalyzer>,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut candidates: HashSet<String> = HashSet::new();
    if let Some(analyzer) = analyzer {
        let analyzed = analyzer.analyze(text);
        noun_chunk_candidates(&analyzed, &mut candidates);
        entity_candidates(&analyzed, &mut candidates);
        lemma_candidates(&analyzed, &mut candidates);
    }
    let lower = text.to_lowercase();
    candidates.extend(gazetteer_matches(&lower).map(str::to_string));

    let mut sorted: Vec<String> = candidates
        .into_iter()
        .filter(|k| {
            let single_symbol = char_len(k) == 1 && !k.chars().all(char::is_alphanumeric);
            !k.is_empty() && !is_numeric(k) && !single_symbol
        })
        .collect();
    sorted.sort_by(|a, b| keyword_order(a, b));

    let mut kept: Vec<String> = Vec::new();
    for kw in sorted {
        if is_domain_stopword(&kw) {
            continue;
        }
        if kept.iter().any(|existing| is_subsumed_by(&kw, existing, 2)) {
            continue;
        }
        if is_essential {
            if ESSENTIAL_GENERIC_INDICATORS.contains(&kw.as_str()) {
                continue;
            }
            if ESSENTIAL_HEDGE_PREFIXES.iter().any(|p| kw.starts_with(p)) && !mentions_tech_term(&kw) {
                continue;
            }
        }
        kept.push(kw);
    }

    let refined: Vec<String> = kept
        .iter()
        .filter(|kw| !kept.iter().any(|other| is_subsumed_by(kw, other, 1)))
        .cloned()
        .collect();

    debug!(
        is_essential,
        count = refined.len(),
        sample = ?refined.iter().take(30).collect::<Vec<_>>(),
        "Extracted section keywords"
    );
    refined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedAnalyzer;

    fn rules() -> Option<&'static dyn LinguisticAnalyzer> {
        Some(&RuleBasedAnalyzer)
    }

    #[test]
    fn test_clean_phrase_strips_qualifiers() {
        assert_eq!(clean_phrase("experience in machine learning"), "machine learning");
        assert_eq!(clean_phrase("strong python skills"), "python");
        assert_eq!(clean_phrase("the solid core java"), "java");
        assert_eq!(clean_phrase("- kafka."), "kafka");
    }

    #[test]
    fn test_essential_list_yields_each_skill() {
        let kws = extract_keywords("Python, AWS, Docker", true, rules());
        for expected in ["python", "aws", "docker"] {
            assert!(kws.contains(&expected.to_string()), "missing {expected} in {kws:?}");
        }
    }

    #[test]
    fn test_specific_phrase_subsumes_its_words() {
        let kws = extract_keywords("We use Spring Boot daily", false, rules());
        assert_eq!(kws, vec!["spring boot".to_string()]);
    }

    #[test]
    fn test_essential_filter_drops_generic_indicators() {
        let general = extract_keywords("Duties include Python", false, rules());
        assert_eq!(general, vec!["python".to_string(), "duty".to_string()]);
        let essential = extract_keywords("Duties include Python", true, rules());
        assert_eq!(essential, vec!["python".to_string()]);
    }

    #[test]
    fn test_without_analyzer_uses_gazetteer_only() {
        let kws = extract_keywords("Experience with Kafka and Spark pipelines", false, None);
        assert_eq!(kws, vec!["kafka".to_string(), "spark".to_string()]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Must have 5+ years of Rust, PostgreSQL and Kubernetes.\n\
                    Experience in distributed systems and event-driven microservices.";
        let first = extract_keywords(text, true, rules());
        for _ in 0..5 {
            assert_eq!(extract_keywords(text, true, rules()), first);
        }
        assert!(!first.is_empty());
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        assert!(extract_keywords("   ", true, rules()).is_empty());
    }

    #[test]
    fn test_keyword_order() {
        let mut v = vec!["aws", "machine learning", "python", "go"];
        v.sort_by(|a, b| keyword_order(a, b));
        assert_eq!(v, vec!["machine learning", "python", "aws", "go"]);
    }
}
