//! Section Segmenter: splits cleaned JD text into labeled sections by header heuristics.
//!
//! A header counts when it starts a line (optionally followed by a colon) or when it appears
//! anywhere directly followed by a colon. Sections are searched in fixed priority order and
//! each one runs until the earliest terminator: a header of a lower-priority section, a stop
//! header ("about us", "benefits", ...), a generic capitalised `Header:` line, or end of text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::models::{JdSections, SectionKind};
use crate::text::{normalize, truncate_chars};

const ESSENTIAL_HEADERS: &str = r"must\s+have|essential\s+(?:criteria|requirements|skills|experience|qualifications)|required\s+(?:skills|qualifications|experience)|core\s+requirements|key\s+requirements|mandatory\s+(?:skills|experience)|minimum\s+(?:qualifications|requirements)|what\s+you(?:\s*'?ll)?\s+bring|you\s+should\s+have|basic\s+qualifications";
const DESIRABLE_HEADERS: &str = r"nice\s+to\s+have|desirable\s+(?:skills|experience|qualifications)|preferred\s+(?:qualifications|skills|experience)|plus\s+points|bonus|good\s+to\s+have|advantageous|additional\s+(?:skills|requirements|qualifications)|would\s+be\s+a\s+plus|extra\s+points|even\s+better\s+if";
const RESPONSIBILITY_HEADERS: &str = r"responsibilities|key\s+responsibilities|duties|job\s+duties|your\s+role|what\s+you\s*'?ll\s+do|scope\s+of\s+work|accountabilities|role\s+and\s+responsibilities|tasks\s+and\s+responsibilities|day-to-day\s+responsibilities|what\s+your\s+day\s+will\s+look\s+like|primary\s+responsibilities";
const SKILLS_HEADERS: &str = r"skills|technical\s+skills|proficiencies|technologies|tools|expertis[ea]|core\s+competencies|technical\s+environment|knowledge\s+of|required\s+toolset|stack|technical\s+qualifications|skill\s+set|our\s+tech\s+stack";
const EDUCATION_HEADERS: &str = r"education|academic\s+background|qualifications\s+required|degree\s+required|educational\s+requirements";
const STOP_HEADERS: &str = r"company\s+overview|about\s+us|about\s+the\s+company|benefits|what\s+we\s+offer|application\s+process|salary|location|reporting\s+to|how\s+to\s+apply|culture|values|diversity\s+and\s+inclusion|equal\s+opportunity\s+employer|contact\s+us|more\s+about";
const BROAD_REQUIREMENT_HEADERS: &str = r"requirements|qualifications|what\s+we\s+are\s+looking\s+for|your\s+profile|who\s+you\s+are|candidate\s+profile|the\s+ideal\s+candidate|key\s+qualifications";

/// Fallback chunk size when no section header can be found.
const FIRST_CHUNK_CHARS: usize = 2000;

fn header_pattern(alternation: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)(?:^[\t ]*(?:{alternation})\b(?:[ \t]*:)?|\b(?:{alternation})[ \t]*:)"
    ))
    .unwrap()
}

static ESSENTIAL: Lazy<Regex> = Lazy::new(|| header_pattern(ESSENTIAL_HEADERS));
static DESIRABLE: Lazy<Regex> = Lazy::new(|| header_pattern(DESIRABLE_HEADERS));
static RESPONSIBILITIES: Lazy<Regex> = Lazy::new(|| header_pattern(RESPONSIBILITY_HEADERS));
static SKILLS: Lazy<Regex> = Lazy::new(|| header_pattern(SKILLS_HEADERS));
static EDUCATION: Lazy<Regex> = Lazy::new(|| header_pattern(EDUCATION_HEADERS));
static STOP: Lazy<Regex> = Lazy::new(|| header_pattern(STOP_HEADERS));
static BROAD_REQUIREMENTS: Lazy<Regex> = Lazy::new(|| header_pattern(BROAD_REQUIREMENT_HEADERS));
/// Any skills-type phrase, used to find the skills part inside essential text.
static EMBEDDED_SKILLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b(?:{SKILLS_HEADERS})\b[ \t]*:?")).unwrap());
/// An unrecognised capitalised header on its own line, e.g. "Our Hiring Process:".
static GENERIC_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[\t ]*[A-Z][\w ()/,&'-]{3,50}:[ \t]*$").unwrap());

/// Sections in search priority order with their header patterns.
fn ordered_sections() -> [(SectionKind, &'static Regex); 5] {
    [
        (SectionKind::EssentialRequirements, &*ESSENTIAL),
        (SectionKind::DesirableRequirements, &*DESIRABLE),
        (SectionKind::Responsibilities, &*RESPONSIBILITIES),
        (SectionKind::GeneralSkills, &*SKILLS),
        (SectionKind::Education, &*EDUCATION),
    ]
}

/// Byte offset of the earliest match of any `terminators` at or after `from`.
fn earliest_terminator(text: &str, from: usize, terminators: &[&Regex]) -> usize {
    terminators
        .iter()
        .filter_map(|re| re.find_at(text, from).map(|m| m.start()))
        .min()
        .unwrap_or(text.len())
}

/// Content following the first match of `header`, up to the earliest terminator.
fn extract_after_header(text: &str, header: &Regex, terminators: &[&Regex]) -> Option<String> {
    let found = header.find(text)?;
    let content_start = found.end();
    let content_end = earliest_terminator(text, content_start, terminators);
    Some(text[content_start..content_end].trim().to_string())
}

/// First chunk of text up to a triple newline, capped at `FIRST_CHUNK_CHARS`.
fn first_chunk(text: &str) -> String {
    let chunk = text.split("\n\n\n").next().unwrap_or_default().trim();
    truncate_chars(chunk, FIRST_CHUNK_CHARS).to_string()
}

/// Splits cleaned JD text into a `JdSections`.
///
/// Guarantees: `full_text` is the input; when the input is non-empty at least one of
/// essential / desirable / general skills is non-empty; every other section is normalized.
pub fn segment(text: &str) -> JdSections {
    let mut sections = JdSections {
        full_text: text.to_string(),
        ..Default::default()
    };
    if text.trim().is_empty() {
        return sections;
    }

    let ordered = ordered_sections();
    for (i, (kind, header)) in ordered.iter().enumerate() {
        let mut terminators: Vec<&Regex> = ordered[i + 1..].iter().map(|(_, re)| *re).collect();
        terminators.push(&STOP);
        terminators.push(&GENERIC_HEADER);

        if let Some(content) = extract_after_header(text, header, &terminators) {
            debug!(section = ?kind, chars = content.len(), "JD section header matched");
            *sections.get_mut(*kind) = content;
        }
    }

    if sections.essential_requirements.is_empty() {
        let all_headers: Vec<&Regex> = ordered
            .iter()
            .map(|(_, re)| *re)
            .chain([&*STOP, &*GENERIC_HEADER])
            .collect();
        if let Some(content) = extract_after_header(text, &BROAD_REQUIREMENTS, &all_headers) {
            debug!("Essential requirements taken from a broad requirements header");
            sections.essential_requirements = truncate_chars(&content, FIRST_CHUNK_CHARS).to_string();
        }
    }

    if sections.general_skills.is_empty() {
        sections.general_skills = general_skills_fallback(
            &sections.essential_requirements,
            &sections.responsibilities,
        );
    }

    if sections.essential_requirements.is_empty()
        && sections.responsibilities.is_empty()
        && sections.general_skills.is_empty()
    {
        warn!("No clear JD sections found, using first part of text for essential requirements");
        sections.essential_requirements = first_chunk(text);
    }

    for (kind, _) in ordered.iter() {
        let cleaned = normalize(sections.get(*kind));
        *sections.get_mut(*kind) = cleaned;
    }
    sections
}

/// Prefers essential text after an embedded skills header, then the essential +
/// responsibilities blend when it talks about skills, then whichever is non-empty.
fn general_skills_fallback(essential: &str, responsibilities: &str) -> String {
    if let Some(m) = EMBEDDED_SKILLS.find(essential) {
        let after = essential[m.end()..].trim();
        if !after.is_empty() {
            return after.to_string();
        }
    }

    let combined = format!("{essential}\n{responsibilities}");
    let lower = combined.to_lowercase();
    if lower.contains("skills") || lower.contains("technologies") {
        return combined.trim().to_string();
    }
    if !essential.is_empty() {
        return essential.to_string();
    }
    responsibilities.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essential_and_nice_to_have_split() {
        let s = segment("Essential Skills: Python, AWS, Docker\nNice to Have: Kubernetes");
        assert_eq!(s.essential_requirements, "Python, AWS, Docker");
        assert_eq!(s.desirable_requirements, "Kubernetes");
    }

    #[test]
    fn test_sections_stop_at_stop_headers_and_later_sections() {
        let jd = "Senior Backend Engineer\n\
                  Responsibilities:\nDesign APIs\nOwn services in production\n\
                  Technical Skills:\nRust, PostgreSQL, Kafka\n\
                  Benefits:\nHealth insurance\n\
                  Education:\nBSc in Computer Science";
        let s = segment(jd);
        assert_eq!(s.responsibilities, "Design APIs\nOwn services in production");
        assert_eq!(s.general_skills, "Rust, PostgreSQL, Kafka");
        assert_eq!(s.education, "BSc in Computer Science");
        assert!(!s.responsibilities.contains("Health"));
    }

    #[test]
    fn test_generic_header_terminates_section() {
        let jd = "Must Have:\nGo and gRPC\nOur Hiring Process:\nThree interviews";
        let s = segment(jd);
        assert_eq!(s.essential_requirements, "Go and gRPC");
    }

    #[test]
    fn test_broad_requirements_fallback() {
        let jd = "Requirements:\n5 years of Java\nSpring Boot\nAbout Us:\nWe sell shoes";
        let s = segment(jd);
        assert_eq!(s.essential_requirements, "5 years of Java\nSpring Boot");
    }

    #[test]
    fn test_general_skills_falls_back_to_essential() {
        let s = segment("Must have: Terraform and Ansible experience");
        assert_eq!(s.general_skills, s.essential_requirements);
        assert!(s.general_skills.contains("Terraform"));
    }

    #[test]
    fn test_skills_header_line_is_its_own_section() {
        let jd = "Must have:\n5 years backend work\nTechnologies: Go, Redis";
        let s = segment(jd);
        assert_eq!(s.essential_requirements, "5 years backend work");
        assert_eq!(s.general_skills, "Go, Redis");
    }

    #[test]
    fn test_general_skills_prefers_text_after_embedded_skills_phrase() {
        let s = segment("Must have: solid experience with tools like Docker and Jenkins");
        assert_eq!(s.general_skills, "like Docker and Jenkins");
    }

    #[test]
    fn test_headerless_text_uses_first_chunk() {
        let jd = "We want someone who can cook pasta and manage a busy kitchen.";
        let s = segment(jd);
        assert_eq!(s.essential_requirements, jd);
        assert_eq!(s.full_text, jd);
    }

    #[test]
    fn test_coverage_invariant_for_varied_inputs() {
        let samples = [
            "x",
            "Nice to have: Scala",
            "Responsibilities: ship features",
            "Education: MSc",
            "About us: a small team",
            "Plain paragraph with no structure at all",
        ];
        for text in samples {
            let s = segment(text);
            assert!(
                !s.essential_requirements.is_empty()
                    || !s.desirable_requirements.is_empty()
                    || !s.general_skills.is_empty(),
                "coverage invariant violated for {text:?}: {s:?}"
            );
        }
    }

    #[test]
    fn test_empty_input_yields_empty_sections() {
        assert_eq!(segment("  "), JdSections { full_text: "  ".into(), ..Default::default() });
    }
}
