use std::collections::HashSet;

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use super::keywords::{extract_keywords, keyword_order};
use super::sections::segment;
use crate::capabilities::Capabilities;
use crate::embedding::{embed_bounded, Embedder};
use crate::models::{CategorizedKeywords, EmbeddingKey, EmbeddingSet, JdSections, JobDescription};
use crate::nlp::lexicon::is_domain_stopword;
use crate::nlp::LinguisticAnalyzer;
use crate::text::{normalize, TextExtractor};

/// Keywords promoted into an empty essential tier.
const MAX_PROMOTED: usize = 15;
const SKILLS_DOC_ESSENTIALS: usize = 15;
const SKILLS_DOC_DESIRABLES: usize = 10;
const FALLBACK_KEYWORDS: usize = 50;
const FALLBACK_ESSENTIALS: usize = 15;

static PLAIN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap());

/// Extracts, cleans, segments, extracts keywords from and embeds one JD document.
///
/// Never fails: an unreadable document yields `JobDescription::default()` with the filename set.
pub async fn parse_job_description(
    raw_bytes: &[u8],
    filename: &str,
    extractor: &dyn TextExtractor,
    caps: &Capabilities,
) -> JobDescription {
    let raw_text = extractor.extract_bytes(raw_bytes, filename).await;
    parse_job_text(&raw_text, filename, caps).await
}

/// Same as [`parse_job_description`] for text that has already been extracted.
pub async fn parse_job_text(raw_text: &str, filename: &str, caps: &Capabilities) -> JobDescription {
    let cleaned_text = normalize(raw_text);
    info!(
        "Parsed JD: {filename}, cleaned full text length: {}",
        cleaned_text.len()
    );
    if cleaned_text.trim().is_empty() {
        warn!("No text could be extracted or cleaned from JD: {filename}");
        return JobDescription {
            filename: filename.to_string(),
            ..Default::default()
        };
    }

    let sections = segment(&cleaned_text);
    let mut keywords = categorize_keywords(&sections, caps.analyzer.get());
    if keywords.is_empty() {
        warn!("No keywords extracted from JD {filename}, using plain-word fallback");
        keywords = plain_word_keywords(&cleaned_text);
    }
    info!(
        essential = keywords.essential.len(),
        desirable = keywords.desirable.len(),
        general = keywords.general.len(),
        "JD keywords categorized for {filename}"
    );
    debug!(essential = ?keywords.essential.iter().take(20).collect::<Vec<_>>(), "Essential keywords");

    let embeddings = match caps.embedder.get() {
        Some(embedder) => embed_sections(embedder, &sections, &keywords).await,
        None => {
            warn!("Embedding capability unavailable; JD {filename} has no embeddings");
            EmbeddingSet::new()
        }
    };

    JobDescription {
        filename: filename.to_string(),
        cleaned_text,
        keywords,
        sections,
        embeddings,
    }
}

/// Keywords per tier, with lower tiers differenced against higher ones.
pub fn categorize_keywords(
    sections: &JdSections,
    analyzer: Option<&dyn LinguisticAnalyzer>,
) -> CategorizedKeywords {
    let essential = extract_keywords(&sections.essential_requirements, true, analyzer);
    let desirable = extract_keywords(&sections.desirable_requirements, false, analyzer);
    let general = extract_keywords(&general_keyword_text(sections), false, analyzer);

    let essential_set: HashSet<&str> = essential.iter().map(String::as_str).collect();
    let desirable: Vec<String> = desirable
        .into_iter()
        .filter(|k| !essential_set.contains(k.as_str()))
        .collect();
    let desirable_set: HashSet<&str> = desirable.iter().map(String::as_str).collect();
    let general: Vec<String> = general
        .into_iter()
        .filter(|k| !essential_set.contains(k.as_str()) && !desirable_set.contains(k.as_str()))
        .collect();

    let mut keywords = CategorizedKeywords {
        essential,
        desirable,
        general,
    };
    promote_when_essentials_missing(&mut keywords);
    keywords
}

/// General skills text, else responsibilities, else essential + responsibilities.
fn general_keyword_text(sections: &JdSections) -> String {
    if !sections.general_skills.is_empty() {
        return sections.general_skills.clone();
    }
    if !sections.responsibilities.is_empty() {
        return sections.responsibilities.clone();
    }
    if sections.essential_requirements.is_empty() {
        return String::new();
    }
    format!("{}\n{}", sections.essential_requirements, sections.responsibilities)
}

/// Moves up to `MAX_PROMOTED` desirable (then general) keywords into an empty essential tier.
fn promote_when_essentials_missing(keywords: &mut CategorizedKeywords) {
    if !keywords.essential.is_empty() || (keywords.desirable.is_empty() && keywords.general.is_empty())
    {
        return;
    }

    let mut promoted: Vec<String> = keywords.desirable.iter().take(MAX_PROMOTED).cloned().collect();
    let room = MAX_PROMOTED.saturating_sub(promoted.len());
    promoted.extend(keywords.general.iter().take(room).cloned());

    let promoted_set: HashSet<String> = promoted.iter().cloned().collect();
    keywords.desirable.retain(|k| !promoted_set.contains(k));
    keywords.general.retain(|k| !promoted_set.contains(k));
    promoted.sort_by(|a, b| keyword_order(a, b));
    info!("Promoted {} keywords into the empty essential tier", promoted.len());
    keywords.essential = promoted;
}

/// Lowercase non-stopword words of 3+ letters, in first-seen order. First 15 become essential.
fn plain_word_keywords(text: &str) -> CategorizedKeywords {
    let mut seen = HashSet::new();
    let words: Vec<String> = PLAIN_WORD
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| !is_domain_stopword(w) && seen.insert(w.clone()))
        .take(FALLBACK_KEYWORDS)
        .collect();

    let split = words.len().min(FALLBACK_ESSENTIALS);
    CategorizedKeywords {
        essential: words[..split].to_vec(),
        desirable: Vec::new(),
        general: words[split..].to_vec(),
    }
}

/// Text built to carry the JD's skill signal: the requirement sections plus the top keywords.
pub fn skills_semantic_document(sections: &JdSections, keywords: &CategorizedKeywords) -> String {
    let mut parts: Vec<String> = Vec::new();
    for text in [
        &sections.essential_requirements,
        &sections.general_skills,
        &sections.responsibilities,
    ] {
        if !text.is_empty() && !parts.contains(text) {
            parts.push(text.clone());
        }
    }
    if !keywords.essential.is_empty() {
        parts.push(join_top(&keywords.essential, SKILLS_DOC_ESSENTIALS));
    }
    if !keywords.desirable.is_empty() {
        parts.push(join_top(&keywords.desirable, SKILLS_DOC_DESIRABLES));
    }
    parts.join(" \n\n ").trim().to_string()
}

fn join_top(keywords: &[String], n: usize) -> String {
    keywords
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(". ")
}

async fn embed_sections(
    embedder: &dyn Embedder,
    sections: &JdSections,
    keywords: &CategorizedKeywords,
) -> EmbeddingSet {
    let skills_document = skills_semantic_document(sections, keywords);
    let inputs: [(EmbeddingKey, &str); 5] = [
        (EmbeddingKey::EssentialRequirements, sections.essential_requirements.as_str()),
        (EmbeddingKey::SkillsSemanticDocument, skills_document.as_str()),
        (EmbeddingKey::Responsibilities, sections.responsibilities.as_str()),
        (EmbeddingKey::DesirableRequirements, sections.desirable_requirements.as_str()),
        (EmbeddingKey::FullText, sections.full_text.as_str()),
    ];

    let vectors = join_all(inputs.iter().map(|(key, text)| async move {
        let label = format!("JD section {key:?}");
        (*key, embed_bounded(embedder, text, &label).await)
    }))
    .await;

    let embeddings: EmbeddingSet = vectors
        .into_iter()
        .filter_map(|(key, vector)| vector.map(|v| (key, v)))
        .collect();
    info!(sections = ?embeddings.keys().collect::<Vec<_>>(), "Generated JD section embeddings");
    embeddings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FileTextExtractor;

    const JD: &str = "Senior Data Engineer\n\
        Essential Skills: Python, AWS, Docker\n\
        Nice to Have: Kubernetes\n\
        Responsibilities:\nBuild Kafka pipelines\nOwn the Airflow scheduler\n\
        About Us:\nWe are a small team.";

    fn is_disjoint(k: &CategorizedKeywords) -> bool {
        let essential: HashSet<&String> = k.essential.iter().collect();
        let desirable: HashSet<&String> = k.desirable.iter().collect();
        essential.is_disjoint(&desirable)
            && k.general
                .iter()
                .all(|g| !essential.contains(g) && !desirable.contains(g))
    }

    #[tokio::test]
    async fn test_python_stays_essential_only() {
        let jd = parse_job_text(JD, "jd.txt", &Capabilities::offline()).await;
        assert!(jd.keywords.essential.contains(&"python".to_string()));
        assert!(!jd.keywords.desirable.contains(&"python".to_string()));
        assert!(!jd.keywords.general.contains(&"python".to_string()));
        assert!(jd.keywords.desirable.contains(&"kubernetes".to_string()));
        assert!(is_disjoint(&jd.keywords));
    }

    #[tokio::test]
    async fn test_embeddings_only_for_non_empty_sections() {
        let jd = parse_job_text(JD, "jd.txt", &Capabilities::offline()).await;
        for key in [
            EmbeddingKey::EssentialRequirements,
            EmbeddingKey::SkillsSemanticDocument,
            EmbeddingKey::Responsibilities,
            EmbeddingKey::DesirableRequirements,
            EmbeddingKey::FullText,
        ] {
            assert!(jd.embeddings.contains_key(&key), "missing embedding for {key:?}");
        }

        let sparse = parse_job_text("Must have: Rust", "jd.txt", &Capabilities::offline()).await;
        assert!(!sparse.embeddings.contains_key(&EmbeddingKey::DesirableRequirements));
        assert!(!sparse.embeddings.contains_key(&EmbeddingKey::Responsibilities));
    }

    #[tokio::test]
    async fn test_without_capabilities_keywords_still_extracted() {
        let jd = parse_job_text(JD, "jd.txt", &Capabilities::unavailable()).await;
        assert!(jd.embeddings.is_empty());
        assert!(jd.keywords.essential.contains(&"python".to_string()));
        assert!(is_disjoint(&jd.keywords));
    }

    #[tokio::test]
    async fn test_empty_document_yields_empty_result() {
        let jd = parse_job_description(b"", "empty.txt", &FileTextExtractor, &Capabilities::offline())
            .await;
        assert!(jd.is_empty());
        assert_eq!(jd.filename, "empty.txt");
    }

    #[tokio::test]
    async fn test_parse_job_description_reads_bytes() {
        let jd = parse_job_description(
            JD.as_bytes(),
            "jd.txt",
            &FileTextExtractor,
            &Capabilities::offline(),
        )
        .await;
        assert!(!jd.cleaned_text.is_empty());
        assert!(jd.sections.essential_requirements.contains("Python"));
    }

    #[test]
    fn test_promotion_fills_empty_essentials() {
        let mut k = CategorizedKeywords {
            essential: vec![],
            desirable: vec!["scala".into()],
            general: vec!["spark".into(), "hadoop".into()],
        };
        promote_when_essentials_missing(&mut k);
        assert_eq!(k.essential, vec!["hadoop", "scala", "spark"]);
        assert!(k.desirable.is_empty() && k.general.is_empty());
    }

    #[test]
    fn test_promotion_caps_at_fifteen() {
        let mut k = CategorizedKeywords {
            essential: vec![],
            desirable: (0..10).map(|i| format!("tool{i:02}")).collect(),
            general: (0..10).map(|i| format!("lib{i:02}")).collect(),
        };
        promote_when_essentials_missing(&mut k);
        assert_eq!(k.essential.len(), 15);
        assert!(k.desirable.is_empty());
        assert_eq!(k.general.len(), 5);
    }

    #[test]
    fn test_skills_document_deduplicates_sections() {
        let sections = JdSections {
            essential_requirements: "Rust and Go".into(),
            general_skills: "Rust and Go".into(),
            responsibilities: "Ship services".into(),
            ..Default::default()
        };
        let keywords = CategorizedKeywords {
            essential: vec!["rust".into(), "go".into()],
            desirable: vec!["nix".into()],
            general: vec![],
        };
        assert_eq!(
            skills_semantic_document(&sections, &keywords),
            "Rust and Go \n\n Ship services \n\n rust. go \n\n nix"
        );
    }

    #[test]
    fn test_plain_word_fallback() {
        let k = plain_word_keywords("Cook pasta, cook risotto and the experience of plating");
        assert_eq!(k.essential, vec!["cook", "pasta", "risotto", "plating"]);
        assert!(k.general.is_empty());
    }
}
