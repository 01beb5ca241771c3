//! Name/Entity Extractor: infers a display name for a resume.
//!
//! Five independent generators each propose `(name, confidence)` candidates. Every candidate
//! must pass [`is_plausible_name`]; the highest confidence wins and ties go to the longer name.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::nlp::lexicon::{is_domain_stopword, NON_NAME_TERMS};
use crate::nlp::{EntityLabel, LinguisticAnalyzer};
use crate::text::{title_case, truncate_chars};

const EXPLICIT_LABEL_WINDOW: usize = 1200;
const ENTITY_WINDOW: usize = 600;
const EMAIL_WINDOW: usize = 1000;
const HEADER_LINES: usize = 5;

static EXPLICIT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:name|candidate[ \t]*(?:name)?|applicant(?:[ \t]*name)?)[ \t]*[:\-_ \t]+[ \t]*([a-zA-ZÀ-ÿ][a-zA-ZÀ-ÿ \t.'’-]{2,68}[a-zA-ZÀ-ÿ])",
    )
    .unwrap()
});
static NAME_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ][a-zA-ZÀ-ÿ\s.'’-]+[a-zA-ZÀ-ÿ.]?$").unwrap());
static REPEATED_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.'’-]{2,}").unwrap());
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2,}").unwrap());
static EMAIL_LOCAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-zA-Z0-9._%+-]+)@").unwrap());
static EMAIL_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\-0-9]+").unwrap());
static FILENAME_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)resume|cv|docx|pdf|doc|txt|final|updated|profile|application|bio|cvitae").unwrap()
});
static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\sÀ-ÿ]").unwrap());
static PLACEHOLDER_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)resume|cv|_|-|\d{2,}|docx|pdf|doc|txt").unwrap());

/// Trailing words that mark an organisation rather than a person when a name has 3+ words.
const ORG_ENDINGS: &[&str] = &[
    "university", "college", "institute", "technologies", "solutions", "systems", "services",
    "limited", "pvt", "inc", "llc", "group",
];
const FILENAME_ONLY_WORDS: &[&str] = &[
    "report", "summary", "details", "application", "submission", "final", "updated", "draft",
];
/// Header lines containing any of these are contact or section lines, not names.
const NON_NAME_LINE_MARKERS: &[&str] = &[
    "skills", "experience", "education", "contact", "profile", "@", "http", "www", "tel", "mob",
    "phone", "linkedin", "github", "date", "address",
];
const GENERIC_MAILBOXES: &[&str] = &[
    "cv", "resume", "contact", "info", "career", "jobs", "admin", "support", "hello", "mail",
    "email", "profile", "recruitment", "hr",
];

#[derive(Debug, Clone, PartialEq)]
struct NameCandidate {
    name: String,
    confidence: u8,
}

fn candidate(name: String, confidence: u8) -> NameCandidate {
    NameCandidate { name, confidence }
}

fn squash_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

fn mostly_capitalized(parts: &[&str]) -> bool {
    let capitalized = parts
        .iter()
        .filter(|p| p.chars().next().map_or(false, char::is_uppercase))
        .count();
    capitalized >= parts.len().saturating_sub(1).max(1)
}

/// Whether `name` looks like a person's name rather than a product, place or section word.
pub fn is_plausible_name(name: &str, filename: &str) -> bool {
    let len = name.chars().count();
    if !(3..=70).contains(&len) || name.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    let lower = name.to_lowercase();
    if NON_NAME_TERMS.contains(lower.as_str()) {
        return false;
    }
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 2 && ORG_ENDINGS.iter().any(|s| lower.ends_with(s)) {
        return false;
    }
    if words.len() == 1
        && filename.to_lowercase().contains(&lower)
        && FILENAME_ONLY_WORDS.contains(&lower.as_str())
    {
        return false;
    }
    if !NAME_SHAPE.is_match(name) || REPEATED_PUNCT.is_match(name) || words.len() > 5 {
        return false;
    }
    let has_cased = name.chars().any(char::is_alphabetic);
    if has_cased && !name.chars().any(char::is_lowercase) && len > 7 {
        return false;
    }
    let long_words: Vec<String> = words
        .iter()
        .filter(|w| w.chars().count() > 2)
        .map(|w| w.to_lowercase())
        .collect();
    !(!long_words.is_empty() && long_words.iter().all(|w| is_domain_stopword(w)))
}

/// "Name: Jane Doe" style label near the top.
fn from_explicit_label(text: &str, filename: &str) -> Vec<NameCandidate> {
    EXPLICIT_NAME
        .captures(truncate_chars(text, EXPLICIT_LABEL_WINDOW))
        .and_then(|caps| caps.get(1))
        .map(|m| title_case(&squash_spaces(m.as_str())))
        .filter(|name| is_plausible_name(name, filename))
        .map(|name| vec![candidate(name, 100)])
        .unwrap_or_default()
}

/// Person entities starting in the first few hundred characters.
fn from_person_entities(
    text: &str,
    filename: &str,
    analyzer: &dyn LinguisticAnalyzer,
) -> Vec<NameCandidate> {
    let window = truncate_chars(text, EXPLICIT_LABEL_WINDOW);
    // Entity offsets are bytes; the window is measured in characters.
    let entity_window_end = truncate_chars(window, ENTITY_WINDOW).len();
    let analyzed = analyzer.analyze(window);
    let mut persons: Vec<_> = analyzed
        .entities
        .iter()
        .filter(|e| e.label == EntityLabel::Person && e.start < entity_window_end)
        .collect();
    persons.sort_by_key(|e| e.start);

    let mut out = Vec::new();
    for entity in persons {
        let name = squash_spaces(&entity.text);
        let parts: Vec<&str> = name.split_whitespace().collect();
        if !(2..=4).contains(&parts.len()) || !mostly_capitalized(&parts) {
            continue;
        }
        let last = parts[parts.len() - 1].to_lowercase();
        if parts.len() > 2 && NON_NAME_TERMS.contains(last.as_str()) {
            let trimmed = parts[..parts.len() - 1].join(" ");
            if is_plausible_name(&trimmed, filename) {
                out.push(candidate(title_case(&trimmed), 92));
            }
        }
        if is_plausible_name(&name, filename) {
            out.push(candidate(title_case(&name), 90));
        }
    }
    out
}

/// Short, capitalised lines at the very top, earlier lines preferred.
fn from_header_lines(text: &str, filename: &str) -> Vec<NameCandidate> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().take(HEADER_LINES).enumerate() {
        let cleaned = squash_spaces(line);
        let len = cleaned.chars().count();
        if !(4..=70).contains(&len) {
            continue;
        }
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        if parts.len() > 4 || !mostly_capitalized(&parts) {
            continue;
        }
        let lower = cleaned.to_lowercase();
        if NON_NAME_LINE_MARKERS.iter().any(|m| lower.contains(m)) || DIGIT_RUN.is_match(&cleaned) {
            continue;
        }
        if is_plausible_name(&cleaned, filename) {
            out.push(candidate(title_case(&cleaned), 85 - 5 * idx as u8));
        }
    }
    out
}

/// "jane.doe@example.com" → "Jane Doe".
fn from_email(text: &str, filename: &str) -> Vec<NameCandidate> {
    let Some(local) = EMAIL_LOCAL
        .captures(truncate_chars(text, EMAIL_WINDOW))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };
    if GENERIC_MAILBOXES.contains(&local.to_lowercase().as_str()) {
        return Vec::new();
    }
    let parts: Vec<String> = EMAIL_SEPARATORS
        .split(local)
        .filter(|p| p.chars().count() > 1 && p.chars().all(char::is_alphabetic))
        .map(capitalize)
        .collect();
    if !(2..=3).contains(&parts.len()) {
        return Vec::new();
    }
    let name = parts.join(" ");
    if is_plausible_name(&name, filename) {
        vec![candidate(name, 75)]
    } else {
        Vec::new()
    }
}

/// "jane_doe_resume_final.pdf" → "Jane Doe".
fn from_filename(filename: &str) -> Vec<NameCandidate> {
    let stem = FILENAME_NOISE.replace_all(file_stem(filename), "");
    let letters = NON_LETTERS.replace_all(&stem, " ");
    let parts: Vec<String> = letters
        .split_whitespace()
        .filter(|p| p.chars().count() > 1 && p.chars().all(char::is_alphabetic))
        .map(capitalize)
        .collect();
    if !(2..=4).contains(&parts.len()) {
        return Vec::new();
    }
    let name = parts.join(" ");
    if is_plausible_name(&name, filename) {
        vec![candidate(name, 50)]
    } else {
        Vec::new()
    }
}

/// Name used when no candidate survives validation.
fn placeholder_name(filename: &str) -> String {
    let cleaned = PLACEHOLDER_NOISE.replace_all(file_stem(filename), "");
    let cleaned = cleaned.trim();
    if cleaned.chars().count() > 1 {
        title_case(cleaned)
    } else {
        let id = Uuid::new_v4().simple().to_string();
        format!("Candidate {}", &id[..4])
    }
}

/// Infers the candidate's display name from resume text and the upload's filename.
///
/// Without an analyzer the person-entity generator is skipped.
pub fn extract_name(
    text: &str,
    filename: &str,
    analyzer: Option<&dyn LinguisticAnalyzer>,
) -> String {
    let mut candidates = Vec::new();
    if !text.trim().is_empty() {
        candidates.extend(from_explicit_label(text, filename));
        if let Some(analyzer) = analyzer {
            candidates.extend(from_person_entities(text, filename, analyzer));
        }
        candidates.extend(from_header_lines(text, filename));
        candidates.extend(from_email(text, filename));
    }
    candidates.extend(from_filename(filename));

    candidates.sort_by(|a, b| {
        b.confidence
            .cmp(&a.confidence)
            .then_with(|| b.name.chars().count().cmp(&a.name.chars().count()))
    });
    debug!(candidates = ?candidates.iter().take(3).collect::<Vec<_>>(), "Name candidates for {filename}");

    match candidates.into_iter().next() {
        Some(best) => {
            info!(
                "Extracted name for '{filename}': '{}' (confidence {})",
                best.name, best.confidence
            );
            best.name
        }
        None => {
            warn!("Could not extract name for {filename}, using a placeholder");
            placeholder_name(filename)
        }
    }
}
